//! Low-level request handling shared by the API implementations

use crate::auth::{ApplicationSettings, UserData};
use crate::error::{ArtivactError, ArtivactResult};
use artivact_conf::ClientSettings;
use artivact_core::{ApiError, ApiResult, OperationProgress, ProgressWatcher, SessionContext};
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Client of one Artivact backend
///
/// Cookies are kept between requests, so a successful [`login`](Self::login)
/// authenticates every following call of this client.
#[derive(Debug, Clone)]
pub struct ArtivactClient {
	http: reqwest::Client,
	base_url: Url,
	locale: Option<String>,
	watcher: ProgressWatcher,
}

impl ArtivactClient {
	/// Create a client from settings
	pub fn new(settings: &ClientSettings) -> ArtivactResult<Self> {
		let base_url = settings.base_url()?;
		let http = reqwest::Client::builder()
			.timeout(settings.request_timeout())
			.user_agent(settings.user_agent.clone())
			.cookie_store(true)
			.build()
			.map_err(|e| ArtivactError::Client(e.to_string()))?;

		tracing::debug!(%base_url, "Created Artivact client");
		Ok(Self {
			http,
			base_url,
			locale: settings.locale.clone(),
			watcher: settings.progress_watcher(),
		})
	}

	/// Create a client from defaults and `ARTIVACT_*` environment variables
	pub fn from_env() -> ArtivactResult<Self> {
		Self::new(&ClientSettings::load(None)?)
	}

	/// Send `locale` as `Accept-Language` with every request
	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());
		self
	}

	/// Root URL of the backend
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Locale sent with every request
	pub fn locale(&self) -> Option<&str> {
		self.locale.as_deref()
	}

	/// Watcher configured for this backend
	pub fn progress_watcher(&self) -> &ProgressWatcher {
		&self.watcher
	}

	/// Wait until the backend's running operation ends
	pub async fn wait_for_operation(&self) -> ArtivactResult<Option<OperationProgress>> {
		Ok(self.watcher.wait(self).await?)
	}

	/// Log in with username and password
	pub async fn login(&self, username: &str, password: &str) -> ArtivactResult<()> {
		let request = self
			.request(Method::POST, &["api", "auth", "login"])?
			.form(&[("username", username), ("password", password)]);
		self.send_empty(request).await?;
		tracing::info!(%username, "Logged in");
		Ok(())
	}

	/// End the authenticated session
	pub async fn logout(&self) -> ArtivactResult<()> {
		let request = self.request(Method::POST, &["api", "auth", "logout"])?;
		self.send_empty(request).await?;
		tracing::info!("Logged out");
		Ok(())
	}

	/// The user behind the current session
	pub async fn current_user(&self) -> ApiResult<UserData> {
		let request = self.request(Method::GET, &["api", "configuration", "public", "user"])?;
		self.send_json(request).await
	}

	/// Identity and locale of the current session
	pub async fn session_context(&self) -> ApiResult<SessionContext> {
		let user = self.current_user().await?;
		Ok(user.session_context(self.locale.as_deref()))
	}

	/// Public application settings
	pub async fn application_settings(&self) -> ApiResult<ApplicationSettings> {
		let request = self.request(Method::GET, &["api", "configuration", "public", "settings"])?;
		self.send_json(request).await
	}

	/// URL of `segments` below the base URL, each segment percent-encoded
	pub(crate) fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
		let mut url = self.base_url.clone();
		url.path_segments_mut()
			.map_err(|_| ApiError::Transport(format!("{} can not be a base URL", self.base_url)))?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}

	pub(crate) fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
		let url = self.endpoint(segments)?;
		let mut headers = HeaderMap::new();
		if let Some(locale) = &self.locale
			&& let Ok(value) = HeaderValue::from_str(locale)
		{
			headers.insert(ACCEPT_LANGUAGE, value);
		}
		Ok(self.http.request(method, url).headers(headers))
	}

	/// Send a request and map transport failures and error statuses
	pub(crate) async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
		let response = request.send().await.map_err(|e| {
			tracing::warn!(error = %e, "Request to backend failed");
			ApiError::Transport(e.to_string())
		})?;

		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}

		let url = response.url().to_string();
		let message = response.text().await.unwrap_or_default();
		let message = if message.trim().is_empty() {
			status.canonical_reason().unwrap_or("unknown").to_string()
		} else {
			message
		};
		tracing::warn!(%url, status = status.as_u16(), %message, "Backend returned an error");

		Err(match status {
			StatusCode::NOT_FOUND => ApiError::NotFound(url),
			StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
				ApiError::Rejected(format!("status {}: {}", status.as_u16(), message))
			}
			_ => ApiError::Status {
				status: status.as_u16(),
				message,
			},
		})
	}

	pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
		let response = self.send(request).await?;
		response
			.json::<T>()
			.await
			.map_err(|e| ApiError::Decode(e.to_string()))
	}

	/// Like [`send_json`](Self::send_json), treating an empty body as `None`
	pub(crate) async fn send_optional_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<Option<T>> {
		let body = self.send_text(request).await?;
		if body.trim().is_empty() {
			return Ok(None);
		}
		serde_json::from_str(&body)
			.map(Some)
			.map_err(|e| ApiError::Decode(e.to_string()))
	}

	pub(crate) async fn send_text(&self, request: RequestBuilder) -> ApiResult<String> {
		let response = self.send(request).await?;
		response
			.text()
			.await
			.map_err(|e| ApiError::Decode(e.to_string()))
	}

	pub(crate) async fn send_empty(&self, request: RequestBuilder) -> ApiResult<()> {
		self.send(request).await.map(|_| ())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn client(base_url: &str) -> ArtivactClient {
		let settings = ClientSettings {
			base_url: base_url.to_string(),
			..Default::default()
		};
		ArtivactClient::new(&settings).unwrap()
	}

	#[rstest]
	#[case("http://localhost:8080", &["api", "page", "welcome"], "http://localhost:8080/api/page/welcome")]
	#[case("http://localhost:8080/artivact/", &["api", "menu"], "http://localhost:8080/artivact/api/menu")]
	#[case("http://localhost:8080", &["api", "page", "a b/c"], "http://localhost:8080/api/page/a%20b%2Fc")]
	fn test_endpoint(#[case] base: &str, #[case] segments: &[&str], #[case] expected: &str) {
		assert_eq!(client(base).endpoint(segments).unwrap().as_str(), expected);
	}

	#[rstest]
	fn test_locale_from_settings() {
		let settings = ClientSettings {
			locale: Some("de".to_string()),
			..Default::default()
		};

		let client = ArtivactClient::new(&settings).unwrap();

		assert_eq!(client.locale(), Some("de"));
		assert_eq!(client.with_locale("fr").locale(), Some("fr"));
	}
}
