//! Page edit sessions
//!
//! A [`PageEditSession`] owns the client-side copies of one page: the
//! published content and, while editing, the work-in-progress (WIP) copy plus
//! a snapshot of the WIP as last loaded or saved.
//!
//! ```text
//!          enter_edit                 publish
//!   View ─────────────▶ Edit ──────────────────▶ View
//!    ▲                  │  ▲ reset / save / edits
//!    └──── discard ─────┘  └──────┘
//! ```
//!
//! `Saving` is entered while reset, publish or save talk to the backend. Any
//! failure returns the session to `Edit` with the WIP as it was.

use crate::api::PageApi;
use crate::error::{PageError, PageResult};
use crate::page::{PageContent, PageMetaData};
use crate::registry::{RenderContext, WidgetRegistry};
use crate::widget::{FileOperation, Widget, WidgetType};
use artivact_core::confirm::{ConfirmRequest, Confirmer};
use artivact_core::ordering::MoveDirection;
use artivact_core::SessionContext;
use artivact_i18n::LocaleContext;
use std::fmt;
use std::sync::Arc;

/// Mode of a page edit session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditMode {
	/// Read-only, showing published content
	View,
	/// Showing and mutating the work-in-progress
	Edit,
	/// Waiting for the backend during reset, publish or save
	Saving,
}

impl fmt::Display for EditMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EditMode::View => write!(f, "VIEW"),
			EditMode::Edit => write!(f, "EDIT"),
			EditMode::Saving => write!(f, "SAVING"),
		}
	}
}

/// Outcome of the unsaved-changes guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
	/// Nothing would be lost
	Proceed,
	/// The WIP has unsaved changes and the user must confirm
	ConfirmationRequired,
}

/// Editable copy of the page metadata
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataDraft {
	pub meta_data: PageMetaData,
}

/// Editable copy of a widget, bound to its position in the WIP
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDraft {
	index: usize,
	widget_id: String,
	/// The cloned widget; its type cannot change
	pub widget: Widget,
}

impl WidgetDraft {
	/// Position of the widget when the draft was opened
	pub fn index(&self) -> usize {
		self.index
	}

	/// Id of the drafted widget
	pub fn widget_id(&self) -> &str {
		&self.widget_id
	}
}

/// Client-held editing state of one page
pub struct PageEditSession {
	api: Arc<dyn PageApi>,
	page_id: String,
	context: SessionContext,
	mode: EditMode,
	published: PageContent,
	wip: Option<PageContent>,
	snapshot: Option<PageContent>,
}

impl PageEditSession {
	/// Load the published content of a page and start in `View` mode
	pub async fn open(api: Arc<dyn PageApi>, id_or_alias: &str, context: SessionContext) -> PageResult<Self> {
		let published = api.load_page(id_or_alias).await?;
		let page_id = if published.id.is_empty() {
			id_or_alias.to_string()
		} else {
			published.id.clone()
		};
		tracing::debug!(%page_id, widgets = published.widgets.len(), "Opened page");
		Ok(Self {
			api,
			page_id,
			context,
			mode: EditMode::View,
			published,
			wip: None,
			snapshot: None,
		})
	}

	/// Id of the page
	pub fn page_id(&self) -> &str {
		&self.page_id
	}

	/// Current mode
	pub fn mode(&self) -> EditMode {
		self.mode
	}

	/// The viewer this session belongs to
	pub fn context(&self) -> &SessionContext {
		&self.context
	}

	/// Published content as last loaded
	pub fn published(&self) -> &PageContent {
		&self.published
	}

	/// The work-in-progress, present in `Edit` mode only
	pub fn wip(&self) -> Option<&PageContent> {
		self.wip.as_ref()
	}

	/// The content currently shown: WIP while editing, published otherwise
	pub fn content(&self) -> &PageContent {
		self.wip.as_ref().unwrap_or(&self.published)
	}

	/// Whether the viewer may enter edit mode
	pub fn is_editable(&self) -> bool {
		self.published.editable
	}

	/// Whether the WIP differs from the snapshot taken when it was loaded or saved
	pub fn is_dirty(&self) -> bool {
		match (&self.wip, &self.snapshot) {
			(Some(wip), Some(snapshot)) => wip != snapshot,
			_ => false,
		}
	}

	fn require(&self, expected: EditMode, operation: &'static str) -> PageResult<()> {
		if self.mode != expected {
			return Err(PageError::InvalidTransition {
				mode: self.mode,
				operation,
			});
		}
		Ok(())
	}

	fn wip_mut(&mut self, operation: &'static str) -> PageResult<&mut PageContent> {
		self.require(EditMode::Edit, operation)?;
		let mode = self.mode;
		self.wip
			.as_mut()
			.ok_or(PageError::InvalidTransition { mode, operation })
	}

	fn commit(&mut self, content: PageContent) {
		self.snapshot = Some(content.clone());
		self.wip = Some(content);
	}

	/// Switch to `Edit`, loading the WIP
	pub async fn enter_edit(&mut self) -> PageResult<()> {
		self.require(EditMode::View, "enter_edit")?;
		if !self.is_editable() {
			tracing::warn!(page_id = %self.page_id, "Page can not be edited by the current user");
			return Err(PageError::NotEditable(self.page_id.clone()));
		}
		let wip = self.api.load_wip_page(&self.page_id).await?;
		self.commit(wip);
		self.mode = EditMode::Edit;
		tracing::info!(page_id = %self.page_id, "Entered edit mode");
		Ok(())
	}

	/// Evaluate the unsaved-changes guard before navigating away
	pub fn leave_guard(&self) -> LeaveDecision {
		if self.mode == EditMode::Edit && self.is_dirty() {
			LeaveDecision::ConfirmationRequired
		} else {
			LeaveDecision::Proceed
		}
	}

	/// Leave `Edit` without saving
	///
	/// Asks for confirmation only when there are unsaved changes. Returns
	/// `false` if the user declined. The backend's WIP is never touched.
	pub async fn discard(&mut self, confirmer: &dyn Confirmer) -> PageResult<bool> {
		self.require(EditMode::Edit, "discard")?;
		if self.leave_guard() == LeaveDecision::ConfirmationRequired {
			let request = ConfirmRequest::DiscardChanges {
				page_id: self.page_id.clone(),
			};
			if !confirmer.confirm(&request).await {
				tracing::debug!(page_id = %self.page_id, "Discard declined");
				return Ok(false);
			}
		}
		self.wip = None;
		self.snapshot = None;
		self.mode = EditMode::View;
		tracing::info!(page_id = %self.page_id, "Left edit mode");
		Ok(true)
	}

	/// Replace the WIP with the published content
	pub async fn reset(&mut self, confirmer: &dyn Confirmer) -> PageResult<bool> {
		self.require(EditMode::Edit, "reset")?;
		let request = ConfirmRequest::ResetWip {
			page_id: self.page_id.clone(),
		};
		if !confirmer.confirm(&request).await {
			return Ok(false);
		}

		self.mode = EditMode::Saving;
		let result = self.api.reset_wip_page(&self.page_id).await;
		self.mode = EditMode::Edit;
		match result {
			Ok(wip) => {
				self.commit(wip);
				tracing::info!(page_id = %self.page_id, "Reset work-in-progress");
				Ok(true)
			}
			Err(e) => {
				tracing::error!(page_id = %self.page_id, error = %e, "Failed to reset work-in-progress");
				Err(e.into())
			}
		}
	}

	/// Persist the WIP
	pub async fn save(&mut self) -> PageResult<()> {
		let wip = self.wip_mut("save")?.clone();
		self.mode = EditMode::Saving;
		let result = self.api.save_wip_page(&self.page_id, &wip).await;
		self.mode = EditMode::Edit;
		match result {
			Ok(saved) => {
				self.commit(saved);
				tracing::debug!(page_id = %self.page_id, "Saved work-in-progress");
				Ok(())
			}
			Err(e) => {
				tracing::error!(page_id = %self.page_id, error = %e, "Failed to save work-in-progress");
				Err(e.into())
			}
		}
	}

	/// Publish the WIP and switch back to `View`
	///
	/// Pending local changes are saved first.
	pub async fn publish(&mut self, confirmer: &dyn Confirmer) -> PageResult<bool> {
		self.require(EditMode::Edit, "publish")?;
		let request = ConfirmRequest::Publish {
			page_id: self.page_id.clone(),
		};
		if !confirmer.confirm(&request).await {
			return Ok(false);
		}

		if self.is_dirty() {
			self.save().await?;
		}

		self.mode = EditMode::Saving;
		match self.api.publish_wip_page(&self.page_id).await {
			Ok(published) => {
				self.published = published;
				self.wip = None;
				self.snapshot = None;
				self.mode = EditMode::View;
				tracing::info!(page_id = %self.page_id, "Published page");
				Ok(true)
			}
			Err(e) => {
				self.mode = EditMode::Edit;
				tracing::error!(page_id = %self.page_id, error = %e, "Failed to publish page");
				Err(e.into())
			}
		}
	}

	/// Open a draft of the page metadata
	pub fn begin_metadata_edit(&self) -> PageResult<MetadataDraft> {
		self.require(EditMode::Edit, "edit_metadata")?;
		Ok(MetadataDraft {
			meta_data: self.content().meta_data.clone(),
		})
	}

	/// Apply a metadata draft to the WIP
	pub fn approve_metadata(&mut self, draft: MetadataDraft) -> PageResult<()> {
		self.wip_mut("edit_metadata")?.meta_data = draft.meta_data;
		Ok(())
	}

	/// Add a widget of `widget_type` and save the WIP immediately
	///
	/// The widget is appended, or inserted at `index`. The saved WIP returned
	/// by the backend replaces the local one so the new widget gets its id.
	/// If saving fails the insertion is rolled back.
	pub async fn add_widget(
		&mut self,
		registry: &WidgetRegistry,
		widget_type: WidgetType,
		index: Option<usize>,
	) -> PageResult<&Widget> {
		let widget = registry.create_widget(widget_type)?;
		let wip = self.wip_mut("add_widget")?;
		let previous = wip.clone();
		let position = wip.insert_widget(widget, index)?;

		if let Err(e) = self.save().await {
			self.wip = Some(previous);
			tracing::warn!(page_id = %self.page_id, %widget_type, "Rolled back added widget");
			return Err(e);
		}

		let wip = self.wip_mut("add_widget")?;
		let len = wip.widgets.len();
		wip.widgets
			.get(position)
			.ok_or(PageError::IndexOutOfBounds { index: position, len })
	}

	/// Remove a widget from the WIP; persisted with the next save or publish
	pub fn delete_widget(&mut self, widget_id: &str) -> PageResult<Widget> {
		self.wip_mut("delete_widget")?.remove_widget(widget_id)
	}

	/// Swap a widget with its neighbour; `false` at the list boundary
	pub fn move_widget(&mut self, widget_id: &str, direction: MoveDirection) -> PageResult<bool> {
		self.wip_mut("move_widget")?.move_widget(widget_id, direction)
	}

	/// Open a draft bound to a clone of a widget
	///
	/// Dropping the draft cancels the edit without touching the WIP.
	pub fn begin_widget_edit(&self, widget_id: &str) -> PageResult<WidgetDraft> {
		self.require(EditMode::Edit, "edit_widget")?;
		let content = self.content();
		let index = content
			.widget_index(widget_id)
			.ok_or_else(|| PageError::UnknownWidget(widget_id.to_string()))?;
		Ok(WidgetDraft {
			index,
			widget_id: widget_id.to_string(),
			widget: content.widgets[index].clone(),
		})
	}

	/// Replace the drafted widget in place
	pub fn approve_widget_edit(&mut self, draft: WidgetDraft) -> PageResult<()> {
		let wip = self.wip_mut("edit_widget")?;
		let index = match wip.widgets.get(draft.index) {
			Some(w) if w.id == draft.widget_id => draft.index,
			_ => wip
				.widget_index(&draft.widget_id)
				.ok_or_else(|| PageError::UnknownWidget(draft.widget_id.clone()))?,
		};
		let mut widget = draft.widget;
		widget.id = draft.widget_id;
		wip.replace_widget(index, widget)
	}

	/// Upload a file for a widget and attach it
	pub async fn upload_widget_file(&mut self, widget_id: &str, filename: &str, bytes: Vec<u8>) -> PageResult<String> {
		let wip = self.wip_mut("upload_widget_file")?;
		if wip.widget(widget_id).is_none() {
			return Err(PageError::UnknownWidget(widget_id.to_string()));
		}
		let stored = self
			.api
			.upload_widget_file(&self.page_id, widget_id, filename, bytes)
			.await?;
		self.apply_file(widget_id, &stored, FileOperation::Add);
		tracing::debug!(page_id = %self.page_id, %widget_id, file = %stored, "Uploaded widget file");
		Ok(stored)
	}

	/// Delete a widget file and detach it
	pub async fn delete_widget_file(&mut self, widget_id: &str, filename: &str) -> PageResult<()> {
		let wip = self.wip_mut("delete_widget_file")?;
		if wip.widget(widget_id).is_none() {
			return Err(PageError::UnknownWidget(widget_id.to_string()));
		}
		let stored = self
			.api
			.delete_widget_file(&self.page_id, widget_id, filename)
			.await?;
		match stored.widget(widget_id) {
			Some(widget) => self.adopt_stored_widget(widget.clone(), filename),
			None => self.apply_file(widget_id, filename, FileOperation::Remove),
		}
		tracing::debug!(page_id = %self.page_id, %widget_id, file = %filename, "Deleted widget file");
		Ok(())
	}

	// The stored widget replaces the snapshot's copy. The WIP copy is replaced
	// only if it has no unsaved edits; otherwise just the file is detached.
	fn adopt_stored_widget(&mut self, stored: Widget, filename: &str) {
		let widget_id = stored.id.clone();
		let unchanged = match (self.wip.as_ref(), self.snapshot.as_ref()) {
			(Some(wip), Some(snapshot)) => wip.widget(&widget_id) == snapshot.widget(&widget_id),
			_ => false,
		};
		if let Some(wip) = self.wip.as_mut()
			&& let Some(widget) = wip.widget_mut(&widget_id)
		{
			if unchanged {
				*widget = stored.clone();
			} else {
				widget.process_file(filename, FileOperation::Remove);
			}
		}
		if let Some(snapshot) = self.snapshot.as_mut()
			&& let Some(widget) = snapshot.widget_mut(&widget_id)
		{
			*widget = stored;
		}
	}

	// The backend stores the change in its WIP right away, so both the local
	// WIP and the snapshot follow it.
	fn apply_file(&mut self, widget_id: &str, filename: &str, operation: FileOperation) {
		for content in [self.wip.as_mut(), self.snapshot.as_mut()].into_iter().flatten() {
			if let Some(widget) = content.widget_mut(widget_id) {
				widget.process_file(filename, operation);
			}
		}
	}

	/// Render the content currently shown
	pub fn render(&self, registry: &WidgetRegistry) -> PageResult<String> {
		let locale = LocaleContext::from_session(&self.context);
		let ctx = match self.mode {
			EditMode::View => RenderContext::new(locale),
			EditMode::Edit | EditMode::Saving => RenderContext::wip(locale),
		};
		registry.render_page(self.content(), &ctx)
	}
}

impl fmt::Debug for PageEditSession {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PageEditSession")
			.field("page_id", &self.page_id)
			.field("mode", &self.mode)
			.field("dirty", &self.is_dirty())
			.finish()
	}
}
