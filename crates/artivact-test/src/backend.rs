//! In-memory backend
//!
//! [`MemoryBackend`] keeps pages and menus the way the Artivact server does
//! and hands out [`MemorySession`]s implementing the page, menu and progress
//! APIs for one viewer. Every call is recorded, and failures can be injected
//! to exercise rollback paths.
//!
//! # Examples
//!
//! ```
//! use artivact_core::SessionContext;
//! use artivact_pages::PageContent;
//! use artivact_test::MemoryBackend;
//!
//! let backend = MemoryBackend::new().with_page(PageContent::new("p1"));
//! let session = backend.session(SessionContext::admin("admin"));
//!
//! assert!(backend.published("p1").is_some());
//! assert_eq!(backend.mutating_calls(), 0);
//! # drop(session);
//! ```

use artivact_core::ids::generate_id;
use artivact_core::restriction::is_allowed;
use artivact_core::{ApiError, ApiResult, OperationProgress, ProgressSource, SessionContext};
use artivact_i18n::Translatable;
use artivact_menu::api::MenuApi;
use artivact_menu::exchange::{cover_picture_file_name, export_file_name};
use artivact_menu::menu::{self as menu_tree, Menu};
use artivact_menu::{ExportConfiguration, MenuExport};
use artivact_pages::api::PageApi;
use artivact_pages::widget::FileOperation;
use artivact_pages::{PageContent, PageIdAndAlias};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

/// A call received by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
	LoadIndexPage,
	LoadPageIds,
	LoadPage(String),
	LoadWipPage(String),
	SaveWipPage(String),
	ResetWipPage(String),
	PublishWipPage(String),
	UploadWidgetFile {
		page_id: String,
		widget_id: String,
		filename: String,
	},
	DeleteWidgetFile {
		page_id: String,
		widget_id: String,
		filename: String,
	},
	LoadMenus,
	SaveMenu(String),
	SaveMenus,
	DeleteMenu(String),
	AddPage(String),
	UploadCoverPicture {
		menu_id: String,
		filename: String,
	},
	RelocateMenu {
		menu_id: String,
		target_id: Option<String>,
	},
	ExportMenu(String),
	ImportMenu(String),
	Progress,
}

impl BackendCall {
	/// Whether the call changes backend state
	pub fn is_mutating(&self) -> bool {
		!matches!(
			self,
			BackendCall::LoadIndexPage
				| BackendCall::LoadPageIds
				| BackendCall::LoadPage(_)
				| BackendCall::LoadWipPage(_)
				| BackendCall::LoadMenus
				| BackendCall::ExportMenu(_)
				| BackendCall::Progress
		)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPage {
	id: String,
	alias: Option<String>,
	published: PageContent,
	wip: Option<PageContent>,
}

impl StoredPage {
	fn new(id: String, restrictions: BTreeSet<String>, alias: Option<String>) -> Self {
		let mut published = PageContent::new(id.clone());
		published.restrictions = restrictions;
		Self {
			id,
			alias,
			published,
			wip: None,
		}
	}

	fn wip(&mut self) -> &mut PageContent {
		self.wip.get_or_insert_with(|| self.published.clone())
	}
}

/// Content of an exported menu archive
#[derive(Debug, Serialize, Deserialize)]
struct MenuArchive {
	menu: Menu,
	pages: Vec<StoredPage>,
}

#[derive(Debug, Default)]
struct BackendState {
	pages: BTreeMap<String, StoredPage>,
	index_page: Option<String>,
	menus: Vec<Menu>,
	files: BTreeMap<(String, String), Vec<u8>>,
	cover_pictures: BTreeMap<String, (String, Vec<u8>)>,
	calls: Vec<BackendCall>,
	offline: bool,
	failure: Option<ApiError>,
	progress: VecDeque<OperationProgress>,
}

impl BackendState {
	fn page_id(&self, id_or_alias: &str) -> ApiResult<String> {
		if self.pages.contains_key(id_or_alias) {
			return Ok(id_or_alias.to_string());
		}
		self.pages
			.values()
			.find(|p| p.alias.as_deref() == Some(id_or_alias))
			.map(|p| p.id.clone())
			.ok_or_else(|| ApiError::NotFound(format!("page {}", id_or_alias)))
	}

	fn page_mut(&mut self, id_or_alias: &str) -> ApiResult<&mut StoredPage> {
		let id = self.page_id(id_or_alias)?;
		self.pages
			.get_mut(&id)
			.ok_or_else(|| ApiError::NotFound(format!("page {}", id_or_alias)))
	}

	fn create_page(&mut self, restrictions: BTreeSet<String>, alias: Option<String>) -> String {
		let id = generate_id();
		self.pages
			.insert(id.clone(), StoredPage::new(id.clone(), restrictions, alias));
		tracing::debug!(page_id = %id, "Created page");
		id
	}

	fn visible_menus(&self, context: &SessionContext) -> Vec<Menu> {
		let mut menus: Vec<Menu> = self
			.menus
			.iter()
			.filter(|m| is_allowed(&m.restrictions, context.roles()))
			.map(|m| m.restricted_for(context.roles()))
			.collect();
		menus.translate(context.locale());
		menus
	}

	/// Bind a new page to every entry that has neither a page nor an external link
	fn create_entry_pages(&mut self) {
		let mut missing = Vec::new();
		for top in &self.menus {
			for entry in top.descendants() {
				if entry.target_page_id.is_none() && entry.external.is_none() {
					missing.push((entry.id.clone(), entry.restrictions.clone(), entry.target_page_alias.clone()));
				}
			}
		}
		for (menu_id, restrictions, alias) in missing {
			let page_id = self.create_page(restrictions, alias);
			if let Some(entry) = menu_tree::find_mut(&mut self.menus, &menu_id) {
				entry.target_page_id = Some(page_id);
			}
		}
	}

	fn detach(&mut self, menu_id: &str) -> Option<Menu> {
		detach_from(&mut self.menus, menu_id)
	}
}

fn detach_from(menus: &mut Vec<Menu>, menu_id: &str) -> Option<Menu> {
	if let Some(index) = menus.iter().position(|m| m.id == menu_id) {
		return Some(menus.remove(index));
	}
	menus
		.iter_mut()
		.find_map(|m| detach_from(&mut m.menu_entries, menu_id))
}

fn assign_menu_ids(menu: &mut Menu) {
	if menu.id.is_empty() {
		menu.id = generate_id();
	}
	for entry in &mut menu.menu_entries {
		entry.parent_id = Some(menu.id.clone());
		assign_menu_ids(entry);
	}
}

/// Shared in-memory state of an emulated Artivact server
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
	state: Arc<Mutex<BackendState>>,
}

impl MemoryBackend {
	/// Create an empty backend
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `page` as published content
	pub fn with_page(self, page: PageContent) -> Self {
		self.add_page(page, None);
		self
	}

	/// Store `menu` as top-level menu
	pub fn with_menu(self, menu: Menu) -> Self {
		self.state.lock().menus.push(menu);
		self
	}

	/// Store `page` as published content, reachable by `alias` as well
	pub fn add_page(&self, page: PageContent, alias: Option<&str>) {
		let id = page.id.clone();
		let stored = StoredPage {
			id: id.clone(),
			alias: alias.map(str::to_string),
			published: page,
			wip: None,
		};
		self.state.lock().pages.insert(id, stored);
	}

	/// Configure the page shown at the root URL
	pub fn set_index_page(&self, id_or_alias: &str) {
		self.state.lock().index_page = Some(id_or_alias.to_string());
	}

	/// A viewer session bound to this backend
	pub fn session(&self, context: SessionContext) -> MemorySession {
		MemorySession {
			backend: self.clone(),
			context,
		}
	}

	/// Stored published content
	pub fn published(&self, page_id: &str) -> Option<PageContent> {
		self.state.lock().pages.get(page_id).map(|p| p.published.clone())
	}

	/// Stored work-in-progress content
	pub fn wip(&self, page_id: &str) -> Option<PageContent> {
		self.state.lock().pages.get(page_id).and_then(|p| p.wip.clone())
	}

	/// Whether a page with `page_id` exists
	pub fn has_page(&self, page_id: &str) -> bool {
		self.state.lock().pages.contains_key(page_id)
	}

	/// Number of stored pages
	pub fn page_count(&self) -> usize {
		self.state.lock().pages.len()
	}

	/// All stored menus, unrestricted and untranslated
	pub fn menus(&self) -> Vec<Menu> {
		self.state.lock().menus.clone()
	}

	/// Bytes of an uploaded widget file
	pub fn widget_file(&self, widget_id: &str, filename: &str) -> Option<Vec<u8>> {
		self.state
			.lock()
			.files
			.get(&(widget_id.to_string(), filename.to_string()))
			.cloned()
	}

	/// Stored file name and bytes of a menu's cover picture
	pub fn cover_picture(&self, menu_id: &str) -> Option<(String, Vec<u8>)> {
		self.state.lock().cover_pictures.get(menu_id).cloned()
	}

	/// Calls received so far, oldest first
	pub fn calls(&self) -> Vec<BackendCall> {
		self.state.lock().calls.clone()
	}

	/// Number of calls that changed backend state
	pub fn mutating_calls(&self) -> usize {
		self.state.lock().calls.iter().filter(|c| c.is_mutating()).count()
	}

	/// Forget recorded calls
	pub fn clear_calls(&self) {
		self.state.lock().calls.clear();
	}

	/// Let every following call fail with a transport error
	pub fn set_offline(&self, offline: bool) {
		self.state.lock().offline = offline;
	}

	/// Let the next call fail with `error`
	pub fn fail_next(&self, error: ApiError) {
		self.state.lock().failure = Some(error);
	}

	/// Queue a progress snapshot; an empty queue reports no running operation
	pub fn push_progress(&self, progress: OperationProgress) {
		self.state.lock().progress.push_back(progress);
	}

	fn call<T, F>(&self, call: BackendCall, handler: F) -> ApiResult<T>
	where
		F: FnOnce(&mut BackendState) -> ApiResult<T>,
	{
		let mut state = self.state.lock();
		tracing::trace!(?call, "Backend call");
		state.calls.push(call);
		if state.offline {
			return Err(ApiError::Transport("backend is offline".to_string()));
		}
		if let Some(error) = state.failure.take() {
			return Err(error);
		}
		handler(&mut state)
	}
}

/// One viewer's connection to a [`MemoryBackend`]
#[derive(Debug, Clone)]
pub struct MemorySession {
	backend: MemoryBackend,
	context: SessionContext,
}

impl MemorySession {
	/// The viewer of this session
	pub fn context(&self) -> &SessionContext {
		&self.context
	}

	/// The backend this session talks to
	pub fn backend(&self) -> &MemoryBackend {
		&self.backend
	}

	fn require_privileged(&self) -> ApiResult<()> {
		if self.context.is_privileged() {
			Ok(())
		} else {
			Err(ApiError::Rejected("Access denied".to_string()))
		}
	}

	fn may_edit(&self, page: &PageContent) -> bool {
		self.context.is_privileged() && page.compute_editable(self.context.roles())
	}

	/// Published content as the viewer sees it
	fn view_of(&self, page: &PageContent) -> PageContent {
		let mut view = page.restricted_for(self.context.roles());
		view.editable = self.may_edit(page);
		view.translate(self.context.locale());
		view
	}

	fn editable_wip(&self, stored: &mut StoredPage) -> PageContent {
		let editable = self.may_edit(&stored.published);
		let mut wip = stored.wip().clone();
		wip.editable = editable;
		wip
	}
}

#[async_trait]
impl PageApi for MemorySession {
	async fn load_index_page(&self) -> ApiResult<Option<String>> {
		self.backend
			.call(BackendCall::LoadIndexPage, |state| Ok(state.index_page.clone()))
	}

	async fn load_page_ids(&self) -> ApiResult<Vec<PageIdAndAlias>> {
		self.backend.call(BackendCall::LoadPageIds, |state| {
			Ok(state
				.pages
				.values()
				.map(|p| PageIdAndAlias {
					id: p.id.clone(),
					alias: p.alias.clone(),
				})
				.collect())
		})
	}

	async fn load_page(&self, id_or_alias: &str) -> ApiResult<PageContent> {
		self.backend
			.call(BackendCall::LoadPage(id_or_alias.to_string()), |state| {
				let stored = state.page_mut(id_or_alias)?;
				if !is_allowed(&stored.published.restrictions, self.context.roles()) {
					return Err(ApiError::Rejected(format!("page {} is restricted", id_or_alias)));
				}
				Ok(self.view_of(&stored.published))
			})
	}

	async fn load_wip_page(&self, id_or_alias: &str) -> ApiResult<PageContent> {
		self.backend
			.call(BackendCall::LoadWipPage(id_or_alias.to_string()), |state| {
				self.require_privileged()?;
				let stored = state.page_mut(id_or_alias)?;
				Ok(self.editable_wip(stored))
			})
	}

	async fn save_wip_page(&self, id_or_alias: &str, content: &PageContent) -> ApiResult<PageContent> {
		self.backend
			.call(BackendCall::SaveWipPage(id_or_alias.to_string()), |state| {
				self.require_privileged()?;
				let stored = state.page_mut(id_or_alias)?;
				if !self.may_edit(&stored.published) {
					return Err(ApiError::Rejected(format!("page {} is not editable", id_or_alias)));
				}
				let mut wip = content.clone();
				wip.id = stored.id.clone();
				for widget in &mut wip.widgets {
					if widget.id.is_empty() {
						widget.id = generate_id();
					}
				}
				stored.wip = Some(wip);
				Ok(self.editable_wip(stored))
			})
	}

	async fn reset_wip_page(&self, id_or_alias: &str) -> ApiResult<PageContent> {
		self.backend
			.call(BackendCall::ResetWipPage(id_or_alias.to_string()), |state| {
				self.require_privileged()?;
				let stored = state.page_mut(id_or_alias)?;
				stored.wip = Some(stored.published.clone());
				Ok(self.editable_wip(stored))
			})
	}

	async fn publish_wip_page(&self, id_or_alias: &str) -> ApiResult<PageContent> {
		self.backend
			.call(BackendCall::PublishWipPage(id_or_alias.to_string()), |state| {
				self.require_privileged()?;
				let stored = state.page_mut(id_or_alias)?;
				if let Some(wip) = stored.wip.take() {
					stored.published = wip;
				}
				Ok(self.view_of(&stored.published))
			})
	}

	async fn upload_widget_file(
		&self,
		page_id: &str,
		widget_id: &str,
		filename: &str,
		bytes: Vec<u8>,
	) -> ApiResult<String> {
		let call = BackendCall::UploadWidgetFile {
			page_id: page_id.to_string(),
			widget_id: widget_id.to_string(),
			filename: filename.to_string(),
		};
		self.backend.call(call, |state| {
			self.require_privileged()?;
			let widget = state
				.page_mut(page_id)?
				.wip()
				.widget_mut(widget_id)
				.ok_or_else(|| ApiError::NotFound(format!("widget {}", widget_id)))?;
			if !widget.processes_files() {
				return Err(ApiError::Rejected(format!("widget {} does not take files", widget_id)));
			}
			widget.process_file(filename, FileOperation::Add);
			state
				.files
				.insert((widget_id.to_string(), filename.to_string()), bytes);
			Ok(filename.to_string())
		})
	}

	async fn delete_widget_file(&self, page_id: &str, widget_id: &str, filename: &str) -> ApiResult<PageContent> {
		let call = BackendCall::DeleteWidgetFile {
			page_id: page_id.to_string(),
			widget_id: widget_id.to_string(),
			filename: filename.to_string(),
		};
		self.backend.call(call, |state| {
			self.require_privileged()?;
			state.files.remove(&(widget_id.to_string(), filename.to_string()));
			let stored = state.page_mut(page_id)?;
			let widget = stored
				.wip()
				.widget_mut(widget_id)
				.ok_or_else(|| ApiError::NotFound(format!("widget {}", widget_id)))?;
			widget.process_file(filename, FileOperation::Remove);
			Ok(self.editable_wip(stored))
		})
	}
}

#[async_trait]
impl MenuApi for MemorySession {
	async fn load_menus(&self) -> ApiResult<Vec<Menu>> {
		self.backend
			.call(BackendCall::LoadMenus, |state| Ok(state.visible_menus(&self.context)))
	}

	async fn save_menu(&self, menu: &Menu) -> ApiResult<Vec<Menu>> {
		self.backend
			.call(BackendCall::SaveMenu(menu.id.clone()), |state| {
				self.require_privileged()?;
				menu.validate()
					.map_err(|e| ApiError::Rejected(e.to_string()))?;

				let mut menu = menu.clone();
				assign_menu_ids(&mut menu);
				if let Some(existing) = menu_tree::find_mut(&mut state.menus, &menu.id) {
					menu.parent_id = existing.parent_id.clone();
					*existing = menu;
				} else if let Some(parent) = menu
					.parent_id
					.clone()
					.and_then(|parent_id| menu_tree::find_mut(&mut state.menus, &parent_id))
				{
					parent.menu_entries.push(menu);
				} else {
					menu.parent_id = None;
					state.menus.push(menu);
				}
				state.create_entry_pages();
				Ok(state.visible_menus(&self.context))
			})
	}

	async fn save_menus(&self, menus: &[Menu]) -> ApiResult<Vec<Menu>> {
		self.backend.call(BackendCall::SaveMenus, |state| {
			self.require_privileged()?;
			let mut menus = menus.to_vec();
			for menu in &mut menus {
				menu.parent_id = None;
				assign_menu_ids(menu);
			}
			state.menus = menus;
			Ok(state.visible_menus(&self.context))
		})
	}

	async fn delete_menu(&self, menu_id: &str) -> ApiResult<Vec<Menu>> {
		self.backend
			.call(BackendCall::DeleteMenu(menu_id.to_string()), |state| {
				self.require_privileged()?;
				let removed = state
					.detach(menu_id)
					.ok_or_else(|| ApiError::NotFound(format!("menu {}", menu_id)))?;
				for page_id in removed.bound_pages() {
					state.pages.remove(page_id);
				}
				state.cover_pictures.retain(|id, _| !removed.contains(id));
				tracing::debug!(%menu_id, pages = removed.bound_pages().len(), "Deleted menu");
				Ok(state.visible_menus(&self.context))
			})
	}

	async fn add_page(&self, menu_id: &str) -> ApiResult<Vec<Menu>> {
		self.backend
			.call(BackendCall::AddPage(menu_id.to_string()), |state| {
				self.require_privileged()?;
				let (restrictions, alias) = state
					.menus
					.iter()
					.find(|m| m.id == menu_id)
					.map(|m| (m.restrictions.clone(), m.target_page_alias.clone()))
					.ok_or_else(|| ApiError::NotFound(format!("menu {}", menu_id)))?;
				let page_id = state.create_page(restrictions, alias);
				if let Some(menu) = state.menus.iter_mut().find(|m| m.id == menu_id) {
					menu.target_page_id = Some(page_id);
				}
				Ok(state.visible_menus(&self.context))
			})
	}

	async fn upload_cover_picture(&self, menu_id: &str, filename: &str, bytes: Vec<u8>) -> ApiResult<()> {
		let call = BackendCall::UploadCoverPicture {
			menu_id: menu_id.to_string(),
			filename: filename.to_string(),
		};
		self.backend.call(call, |state| {
			self.require_privileged()?;
			if menu_tree::find(&state.menus, menu_id).is_none() {
				return Err(ApiError::NotFound(format!("menu {}", menu_id)));
			}
			let stored = cover_picture_file_name(filename)
				.ok_or_else(|| ApiError::Rejected(format!("{} has no file extension", filename)))?;
			state.cover_pictures.insert(menu_id.to_string(), (stored, bytes));
			Ok(())
		})
	}

	async fn relocate_menu(&self, menu_id: &str, target_id: Option<&str>) -> ApiResult<Vec<Menu>> {
		let call = BackendCall::RelocateMenu {
			menu_id: menu_id.to_string(),
			target_id: target_id.map(str::to_string),
		};
		self.backend.call(call, |state| {
			self.require_privileged()?;
			let node = menu_tree::find(&state.menus, menu_id)
				.ok_or_else(|| ApiError::NotFound(format!("menu {}", menu_id)))?;
			if let Some(target_id) = target_id {
				if node.contains(target_id) {
					return Err(ApiError::Rejected(format!("{} can not contain itself", menu_id)));
				}
				if menu_tree::find(&state.menus, target_id).is_none() {
					return Err(ApiError::NotFound(format!("menu {}", target_id)));
				}
			}

			let Some(mut node) = state.detach(menu_id) else {
				return Err(ApiError::NotFound(format!("menu {}", menu_id)));
			};
			node.parent_id = target_id.map(str::to_string);
			match target_id.and_then(|t| menu_tree::find_mut(&mut state.menus, t)) {
				Some(target) => target.menu_entries.push(node),
				None => state.menus.push(node),
			}
			Ok(state.visible_menus(&self.context))
		})
	}

	async fn export_menu(&self, menu_id: &str, config: &ExportConfiguration) -> ApiResult<MenuExport> {
		self.backend
			.call(BackendCall::ExportMenu(menu_id.to_string()), |state| {
				let mut menu = menu_tree::find(&state.menus, menu_id)
					.cloned()
					.ok_or_else(|| ApiError::NotFound(format!("menu {}", menu_id)))?;
				if config.apply_restrictions {
					menu = menu.restricted_for(self.context.roles());
				}
				let pages = menu
					.bound_pages()
					.into_iter()
					.filter_map(|id| state.pages.get(id))
					.map(|stored| {
						let mut stored = stored.clone();
						stored.wip = None;
						if config.apply_restrictions {
							stored.published = stored.published.restricted_for(self.context.roles());
						}
						stored
					})
					.collect();
				let bytes = serde_json::to_vec(&MenuArchive { menu, pages })
					.map_err(|e| ApiError::Decode(e.to_string()))?;
				Ok(MenuExport {
					file_name: export_file_name(menu_id, chrono::Local::now().date_naive()),
					bytes,
				})
			})
	}

	async fn import_menu(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<()> {
		self.backend
			.call(BackendCall::ImportMenu(file_name.to_string()), |state| {
				self.require_privileged()?;
				let archive: MenuArchive = serde_json::from_slice(&bytes)
					.map_err(|e| ApiError::Rejected(format!("invalid menu archive: {}", e)))?;

				let menu = archive.menu;
				match menu_tree::find_mut(&mut state.menus, &menu.id) {
					Some(existing) => *existing = menu,
					None => {
						let parent = menu
							.parent_id
							.clone()
							.and_then(|id| menu_tree::find_mut(&mut state.menus, &id));
						match parent {
							Some(parent) => parent.menu_entries.push(menu),
							None => state.menus.push(Menu { parent_id: None, ..menu }),
						}
					}
				}
				for page in archive.pages {
					state.pages.insert(page.id.clone(), page);
				}
				tracing::debug!(%file_name, "Imported menu archive");
				Ok(())
			})
	}
}

#[async_trait]
impl ProgressSource for MemorySession {
	async fn progress(&self) -> ApiResult<Option<OperationProgress>> {
		self.backend
			.call(BackendCall::Progress, |state| Ok(state.progress.pop_front()))
	}
}
