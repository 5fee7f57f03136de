//! Page endpoints under `/api/page`

use crate::client::ArtivactClient;
use artivact_core::{ApiError, ApiResult};
use artivact_pages::api::PageApi;
use artivact_pages::{PageContent, PageIdAndAlias};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

const PAGE: [&str; 2] = ["api", "page"];

fn page_path<'a>(rest: &[&'a str]) -> Vec<&'a str> {
	PAGE.iter().copied().chain(rest.iter().copied()).collect()
}

#[async_trait]
impl PageApi for ArtivactClient {
	async fn load_index_page(&self) -> ApiResult<Option<String>> {
		let request = self.request(Method::GET, &PAGE)?;
		let body = self.send_text(request).await?;
		let id_or_alias = body.trim();
		Ok((!id_or_alias.is_empty()).then(|| id_or_alias.to_string()))
	}

	async fn load_page_ids(&self) -> ApiResult<Vec<PageIdAndAlias>> {
		let request = self.request(Method::GET, &page_path(&["id"]))?;
		self.send_json(request).await
	}

	async fn load_page(&self, id_or_alias: &str) -> ApiResult<PageContent> {
		let request = self.request(Method::GET, &page_path(&[id_or_alias]))?;
		self.send_json(request).await
	}

	async fn load_wip_page(&self, id_or_alias: &str) -> ApiResult<PageContent> {
		let request = self.request(Method::GET, &page_path(&[id_or_alias, "wip"]))?;
		self.send_json(request).await
	}

	async fn save_wip_page(&self, id_or_alias: &str, content: &PageContent) -> ApiResult<PageContent> {
		let request = self
			.request(Method::POST, &page_path(&[id_or_alias]))?
			.json(content);
		let saved = self.send_json(request).await?;
		tracing::debug!(page = %id_or_alias, "Saved work-in-progress page");
		Ok(saved)
	}

	async fn reset_wip_page(&self, id_or_alias: &str) -> ApiResult<PageContent> {
		let request = self.request(Method::POST, &page_path(&["reset-wip", id_or_alias]))?;
		self.send_json(request).await
	}

	async fn publish_wip_page(&self, id_or_alias: &str) -> ApiResult<PageContent> {
		let request = self.request(Method::POST, &page_path(&["publish-wip", id_or_alias]))?;
		let published = self.send_json(request).await?;
		tracing::info!(page = %id_or_alias, "Published page");
		Ok(published)
	}

	async fn upload_widget_file(
		&self,
		page_id: &str,
		widget_id: &str,
		filename: &str,
		bytes: Vec<u8>,
	) -> ApiResult<String> {
		let part = Part::bytes(bytes)
			.file_name(filename.to_string())
			.mime_str("application/octet-stream")
			.map_err(|e| ApiError::Transport(e.to_string()))?;
		let request = self
			.request(Method::POST, &page_path(&[page_id, "widget", widget_id]))?
			.multipart(Form::new().part("file", part));
		self.send_text(request).await
	}

	async fn delete_widget_file(&self, page_id: &str, widget_id: &str, filename: &str) -> ApiResult<PageContent> {
		let request = self.request(Method::DELETE, &page_path(&[page_id, "widget", widget_id, filename]))?;
		self.send_json(request).await
	}
}
