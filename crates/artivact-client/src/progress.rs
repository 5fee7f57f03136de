use crate::client::ArtivactClient;
use artivact_core::{ApiError, OperationProgress, ProgressSource};
use async_trait::async_trait;
use reqwest::Method;

#[async_trait]
impl ProgressSource for ArtivactClient {
	async fn progress(&self) -> Result<Option<OperationProgress>, ApiError> {
		let request = self.request(Method::GET, &["api", "operation", "progress"])?;
		self.send_optional_json(request).await
	}
}
