//! Menu endpoints under `/api/menu`

use crate::client::ArtivactClient;
use artivact_core::{ApiError, ApiResult};
use artivact_menu::api::MenuApi;
use artivact_menu::exchange::export_file_name;
use artivact_menu::{ExportConfiguration, Menu, MenuExport};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};

/// Path segment addressing the top level as relocation target
const TOP_LEVEL_TARGET: &str = "main";

fn menu_path<'a>(rest: &[&'a str]) -> Vec<&'a str> {
	["api", "menu"].into_iter().chain(rest.iter().copied()).collect()
}

/// File name from an `attachment; filename=...` header value
fn attachment_file_name(header: &str) -> Option<String> {
	header.split(';').find_map(|part| {
		let name = part.trim().strip_prefix("filename=")?.trim_matches('"');
		(!name.is_empty()).then(|| name.to_string())
	})
}

#[async_trait]
impl MenuApi for ArtivactClient {
	async fn load_menus(&self) -> ApiResult<Vec<Menu>> {
		let request = self.request(Method::GET, &menu_path(&[]))?;
		self.send_json(request).await
	}

	async fn save_menu(&self, menu: &Menu) -> ApiResult<Vec<Menu>> {
		let request = self.request(Method::POST, &menu_path(&[]))?.json(menu);
		self.send_json(request).await
	}

	async fn save_menus(&self, menus: &[Menu]) -> ApiResult<Vec<Menu>> {
		let request = self.request(Method::POST, &menu_path(&["all"]))?.json(menus);
		self.send_json(request).await
	}

	async fn delete_menu(&self, menu_id: &str) -> ApiResult<Vec<Menu>> {
		let request = self.request(Method::DELETE, &menu_path(&[menu_id]))?;
		self.send_json(request).await
	}

	async fn add_page(&self, menu_id: &str) -> ApiResult<Vec<Menu>> {
		let request = self.request(Method::POST, &menu_path(&[menu_id, "page"]))?;
		self.send_json(request).await
	}

	async fn upload_cover_picture(&self, menu_id: &str, filename: &str, bytes: Vec<u8>) -> ApiResult<()> {
		let part = Part::bytes(bytes)
			.file_name(filename.to_string())
			.mime_str("application/octet-stream")
			.map_err(|e| ApiError::Transport(e.to_string()))?;
		let request = self
			.request(Method::POST, &menu_path(&[menu_id, "cover-picture"]))?
			.multipart(Form::new().part("file", part));
		self.send_empty(request).await
	}

	async fn relocate_menu(&self, menu_id: &str, target_id: Option<&str>) -> ApiResult<Vec<Menu>> {
		let target = target_id.unwrap_or(TOP_LEVEL_TARGET);
		let request = self.request(Method::PUT, &menu_path(&[menu_id, "relocate", target]))?;
		self.send_empty(request).await?;
		// The backend answers with a status text only.
		self.load_menus().await
	}

	async fn export_menu(&self, menu_id: &str, config: &ExportConfiguration) -> ApiResult<MenuExport> {
		let request = self
			.request(Method::GET, &menu_path(&[menu_id, "export"]))?
			.query(&config.query_pairs());
		let response = self.send(request).await?;

		let file_name = response
			.headers()
			.get(CONTENT_DISPOSITION)
			.and_then(|v| v.to_str().ok())
			.and_then(attachment_file_name)
			.unwrap_or_else(|| export_file_name(menu_id, chrono::Local::now().date_naive()));
		let bytes = response
			.bytes()
			.await
			.map_err(|e| ApiError::Decode(e.to_string()))?;

		tracing::info!(%menu_id, %file_name, size = bytes.len(), "Exported menu");
		Ok(MenuExport {
			file_name,
			bytes: bytes.to_vec(),
		})
	}

	async fn import_menu(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<()> {
		let part = Part::bytes(bytes)
			.file_name(file_name.to_string())
			.mime_str("application/zip")
			.map_err(|e| ApiError::Transport(e.to_string()))?;
		let request = self
			.request(Method::POST, &menu_path(&["import"]))?
			.multipart(Form::new().part("file", part));
		self.send_empty(request).await
	}
}
