//! Menu tree editing
//!
//! [`MenuEditor`] keeps the menu forest of the backend and applies every
//! change through the [`MenuApi`]. Local state is only replaced by the
//! backend's answer, so a failed call leaves the tree as it was.

use crate::api::MenuApi;
use crate::error::{MenuError, MenuResult};
use crate::exchange::{ExportConfiguration, MenuExport, cover_picture_file_name};
use crate::menu::{self, Menu};
use artivact_core::confirm::{ConfirmRequest, Confirmer};
use artivact_core::ids::generate_id;
use artivact_core::ordering::{MoveDirection, swap_neighbor};
use artivact_i18n::TranslatableString;
use std::sync::Arc;

/// Destination of a relocated node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationTarget {
	/// Become a top-level menu
	TopLevel,
	/// Become an entry of the node with this id
	Under(String),
}

/// Editor of the navigation tree
pub struct MenuEditor {
	api: Arc<dyn MenuApi>,
	menus: Vec<Menu>,
}

impl MenuEditor {
	/// Load all menus
	pub async fn load(api: Arc<dyn MenuApi>) -> MenuResult<Self> {
		let menus = api.load_menus().await?;
		tracing::debug!(count = menus.len(), "Loaded menus");
		Ok(Self { api, menus })
	}

	/// The current menu forest
	pub fn menus(&self) -> &[Menu] {
		&self.menus
	}

	/// The node with `id`
	pub fn find(&self, id: &str) -> Option<&Menu> {
		menu::find(&self.menus, id)
	}

	fn require(&self, id: &str) -> MenuResult<&Menu> {
		self.find(id)
			.ok_or_else(|| MenuError::UnknownMenu(id.to_string()))
	}

	/// Where the node with `id` navigates to
	pub fn page_target(&self, id: &str) -> Option<&str> {
		self.find(id).and_then(Menu::page_target)
	}

	/// Reload all menus from the backend
	pub async fn reload(&mut self) -> MenuResult<()> {
		self.menus = self.api.load_menus().await?;
		Ok(())
	}

	fn created(&self, id: &str) -> MenuResult<&Menu> {
		self.find(id).ok_or_else(|| {
			MenuError::UnknownMenu(format!("{} was not returned after saving", id))
		})
	}

	/// Create a top-level menu
	pub async fn create_menu(&mut self, title: impl Into<TranslatableString>) -> MenuResult<&Menu> {
		let menu = Menu::new(generate_id(), title);
		menu.validate()?;
		self.menus = self.api.save_menu(&menu).await?;
		tracing::info!(menu_id = %menu.id, "Created menu");
		self.created(&menu.id)
	}

	/// Create an entry under `parent_id`
	///
	/// Unless `external` is given, the backend creates a page for the entry.
	pub async fn create_entry(
		&mut self,
		parent_id: &str,
		title: impl Into<TranslatableString>,
		external: Option<String>,
	) -> MenuResult<&Menu> {
		let mut entry = Menu::new(generate_id(), title).with_parent(parent_id);
		entry.external = external;
		entry.validate()?;

		let entry_id = entry.id.clone();
		let root = self.with_root_of(parent_id, |parent| parent.menu_entries.push(entry))?;
		self.menus = self.api.save_menu(&root).await?;
		tracing::info!(menu_id = %entry_id, %parent_id, "Created menu entry");
		self.created(&entry_id)
	}

	/// Save changes to an existing node
	///
	/// The backend stores top-level menus as a whole, so a changed entry is
	/// saved as part of its top-level menu.
	pub async fn update(&mut self, menu: &Menu) -> MenuResult<()> {
		menu.validate()?;
		self.require(&menu.id)?;
		let root = self.with_root_of(&menu.id, |node| *node = menu.clone())?;
		self.menus = self.api.save_menu(&root).await?;
		Ok(())
	}

	/// Clone of the top-level menu containing `id`, with `change` applied to that node
	fn with_root_of<F>(&self, id: &str, change: F) -> MenuResult<Menu>
	where
		F: FnOnce(&mut Menu),
	{
		let mut root = self
			.menus
			.iter()
			.find(|m| m.contains(id))
			.cloned()
			.ok_or_else(|| MenuError::UnknownMenu(id.to_string()))?;
		let node = menu::find_mut(std::slice::from_mut(&mut root), id)
			.ok_or_else(|| MenuError::UnknownMenu(id.to_string()))?;
		change(node);
		Ok(root)
	}

	/// Create a page for a top-level menu
	pub async fn add_page(&mut self, menu_id: &str) -> MenuResult<()> {
		if !self.require(menu_id)?.is_top_level() {
			return Err(MenuError::InvalidHierarchy(format!(
				"Pages can only be added to top-level menus: {}",
				menu_id
			)));
		}
		self.menus = self.api.add_page(menu_id).await?;
		Ok(())
	}

	/// Upload the cover picture of a menu
	///
	/// The file name must carry an extension, which the stored picture keeps.
	pub async fn set_cover_picture(&self, menu_id: &str, filename: &str, bytes: Vec<u8>) -> MenuResult<()> {
		self.require(menu_id)?;
		if cover_picture_file_name(filename).is_none() {
			return Err(MenuError::Validation(format!(
				"Cover picture needs a file extension: {}",
				filename
			)));
		}
		if bytes.is_empty() {
			return Err(MenuError::Validation(format!("Cover picture {} is empty", filename)));
		}
		self.api.upload_cover_picture(menu_id, filename, bytes).await?;
		tracing::info!(%menu_id, file = %filename, "Uploaded cover picture");
		Ok(())
	}

	/// Delete a node with its descendants and their pages after confirmation
	///
	/// Returns `false`, without contacting the backend, if the user declined.
	pub async fn delete(&mut self, menu_id: &str, confirmer: &dyn Confirmer) -> MenuResult<bool> {
		let node = self.require(menu_id)?;
		let request = ConfirmRequest::DeleteMenu {
			menu_id: menu_id.to_string(),
			title: node.title.value.clone(),
			descendant_count: node.descendants().len(),
		};
		if !confirmer.confirm(&request).await {
			return Ok(false);
		}
		self.menus = self.api.delete_menu(menu_id).await?;
		tracing::info!(%menu_id, "Deleted menu");
		Ok(true)
	}

	/// Move a top-level menu one position to the left
	pub async fn move_left(&mut self, menu_id: &str) -> MenuResult<bool> {
		self.reorder(menu_id, MoveDirection::Up, true).await
	}

	/// Move a top-level menu one position to the right
	pub async fn move_right(&mut self, menu_id: &str) -> MenuResult<bool> {
		self.reorder(menu_id, MoveDirection::Down, true).await
	}

	/// Move an entry one position up within its menu
	pub async fn move_up(&mut self, menu_id: &str) -> MenuResult<bool> {
		self.reorder(menu_id, MoveDirection::Up, false).await
	}

	/// Move an entry one position down within its menu
	pub async fn move_down(&mut self, menu_id: &str) -> MenuResult<bool> {
		self.reorder(menu_id, MoveDirection::Down, false).await
	}

	async fn reorder(&mut self, menu_id: &str, direction: MoveDirection, top_level: bool) -> MenuResult<bool> {
		self.require(menu_id)?;
		let parent_id = menu::parent_of(&self.menus, menu_id).map(|p| p.id.clone());
		if parent_id.is_none() != top_level {
			let expected = if top_level { "a top-level menu" } else { "a menu entry" };
			return Err(MenuError::InvalidHierarchy(format!("{} is not {}", menu_id, expected)));
		}

		let mut menus = self.menus.clone();
		let siblings = match &parent_id {
			None => &mut menus[..],
			Some(parent_id) => match menu::find_mut(&mut menus, parent_id) {
				Some(parent) => &mut parent.menu_entries[..],
				None => return Err(MenuError::UnknownMenu(parent_id.clone())),
			},
		};
		let Some(index) = siblings.iter().position(|m| m.id == menu_id) else {
			return Err(MenuError::UnknownMenu(menu_id.to_string()));
		};
		if !swap_neighbor(siblings, index, direction) {
			return Ok(false);
		}

		self.menus = self.api.save_menus(&menus).await?;
		tracing::debug!(%menu_id, ?direction, "Reordered menu");
		Ok(true)
	}

	/// Move a node under another parent or to the top level
	pub async fn relocate(&mut self, menu_id: &str, target: RelocationTarget) -> MenuResult<()> {
		let node = self.require(menu_id)?;
		let target_id = match &target {
			RelocationTarget::TopLevel => None,
			RelocationTarget::Under(target_id) => {
				self.require(target_id)?;
				if node.contains(target_id) {
					return Err(MenuError::InvalidHierarchy(format!(
						"{} can not be moved into itself or one of its entries",
						menu_id
					)));
				}
				Some(target_id.as_str())
			}
		};
		self.menus = self.api.relocate_menu(menu_id, target_id).await?;
		tracing::info!(%menu_id, ?target, "Relocated menu");
		Ok(())
	}

	/// Download a node as archive
	pub async fn export(&self, menu_id: &str, config: &ExportConfiguration) -> MenuResult<MenuExport> {
		self.require(menu_id)?;
		Ok(self.api.export_menu(menu_id, config).await?)
	}

	/// Upload an archive and reload the menus
	pub async fn import(&mut self, file_name: &str, bytes: Vec<u8>) -> MenuResult<()> {
		self.api.import_menu(file_name, bytes).await?;
		tracing::info!(%file_name, "Imported menu");
		self.reload().await
	}
}

impl std::fmt::Debug for MenuEditor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MenuEditor")
			.field("menus", &self.menus.len())
			.finish()
	}
}
