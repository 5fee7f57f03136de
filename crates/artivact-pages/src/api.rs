//! Backend contract for pages

use crate::page::{PageContent, PageIdAndAlias};
use artivact_core::ApiResult;
use async_trait::async_trait;

/// Page endpoints of the backend
///
/// Implementations are bound to one viewer session, so identity and locale
/// travel with the implementation rather than with each call.
#[async_trait]
pub trait PageApi: Send + Sync {
	/// Id or alias of the index page, `None` if no index page is configured
	async fn load_index_page(&self) -> ApiResult<Option<String>>;

	/// Ids and aliases of every page
	async fn load_page_ids(&self) -> ApiResult<Vec<PageIdAndAlias>>;

	/// Published content, translated for the session locale
	async fn load_page(&self, id_or_alias: &str) -> ApiResult<PageContent>;

	/// Work-in-progress content, created from the published content if absent
	async fn load_wip_page(&self, id_or_alias: &str) -> ApiResult<PageContent>;

	/// Store `content` as the new work-in-progress
	async fn save_wip_page(&self, id_or_alias: &str, content: &PageContent) -> ApiResult<PageContent>;

	/// Overwrite the work-in-progress with the published content
	async fn reset_wip_page(&self, id_or_alias: &str) -> ApiResult<PageContent>;

	/// Overwrite the published content with the work-in-progress
	async fn publish_wip_page(&self, id_or_alias: &str) -> ApiResult<PageContent>;

	/// Upload a file for a widget of the work-in-progress, returning the stored name
	async fn upload_widget_file(
		&self,
		page_id: &str,
		widget_id: &str,
		filename: &str,
		bytes: Vec<u8>,
	) -> ApiResult<String>;

	/// Remove a widget file from the work-in-progress
	async fn delete_widget_file(&self, page_id: &str, widget_id: &str, filename: &str) -> ApiResult<PageContent>;
}
