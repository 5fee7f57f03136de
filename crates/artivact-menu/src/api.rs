//! Backend contract for menus

use crate::exchange::{ExportConfiguration, MenuExport};
use crate::menu::Menu;
use artivact_core::ApiResult;
use async_trait::async_trait;

/// Menu endpoints of the backend
///
/// Every mutating call answers with the complete, updated menu forest.
#[async_trait]
pub trait MenuApi: Send + Sync {
	/// All menus visible to the session
	async fn load_menus(&self) -> ApiResult<Vec<Menu>>;

	/// Create or update one menu including its entries
	async fn save_menu(&self, menu: &Menu) -> ApiResult<Vec<Menu>>;

	/// Replace all menus, used for reordering
	async fn save_menus(&self, menus: &[Menu]) -> ApiResult<Vec<Menu>>;

	/// Delete a node, its descendants and their pages
	async fn delete_menu(&self, menu_id: &str) -> ApiResult<Vec<Menu>>;

	/// Create a page and bind it to a top-level menu
	async fn add_page(&self, menu_id: &str) -> ApiResult<Vec<Menu>>;

	/// Store the cover picture of a node, replacing an earlier one
	async fn upload_cover_picture(&self, menu_id: &str, filename: &str, bytes: Vec<u8>) -> ApiResult<()>;

	/// Move a node under `target_id`, or to the top level when `None`
	async fn relocate_menu(&self, menu_id: &str, target_id: Option<&str>) -> ApiResult<Vec<Menu>>;

	/// Download a node as archive
	async fn export_menu(&self, menu_id: &str, config: &ExportConfiguration) -> ApiResult<MenuExport>;

	/// Upload an exported archive, overwriting existing nodes and pages
	async fn import_menu(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<()>;
}
