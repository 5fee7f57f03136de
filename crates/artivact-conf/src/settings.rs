//! Client settings and their layered loading

use crate::error::{ConfError, ConfResult};
use crate::sources::{ConfigSource, DefaultSource, EnvSource, TomlFileSource};
use artivact_core::ProgressWatcher;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Settings of an Artivact backend client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
	/// Root URL of the backend
	pub base_url: String,
	/// Timeout of a single request in seconds
	pub request_timeout_secs: u64,
	/// Interval between operation progress polls in milliseconds
	pub progress_poll_interval_ms: u64,
	/// Give up waiting for an operation after this many seconds
	pub progress_timeout_secs: Option<u64>,
	/// Locale sent with every request
	pub locale: Option<String>,
	/// `User-Agent` header
	pub user_agent: String,
}

impl Default for ClientSettings {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			request_timeout_secs: 30,
			progress_poll_interval_ms: 500,
			progress_timeout_secs: None,
			locale: None,
			user_agent: concat!("artivact-client/", env!("CARGO_PKG_VERSION")).to_string(),
		}
	}
}

impl ClientSettings {
	/// Load settings from defaults, an optional TOML file and `ARTIVACT_*` variables
	pub fn load(path: Option<PathBuf>) -> ConfResult<Self> {
		let mut builder = SettingsBuilder::new()
			.add_source(SettingsBuilder::default_source())
			.add_source(EnvSource::default());
		if let Some(path) = path {
			builder = builder.add_source(TomlFileSource::new(path));
		}
		builder.build()
	}

	/// The parsed backend URL, always ending with a slash
	pub fn base_url(&self) -> ConfResult<Url> {
		let mut raw = self.base_url.trim().to_string();
		if !raw.ends_with('/') {
			raw.push('/');
		}
		let url = Url::parse(&raw).map_err(|e| ConfError::Invalid {
			key: "base_url",
			message: e.to_string(),
		})?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(ConfError::Invalid {
				key: "base_url",
				message: format!("unsupported scheme '{}'", url.scheme()),
			});
		}
		Ok(url)
	}

	/// Request timeout
	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	/// Watcher configured with the progress settings
	pub fn progress_watcher(&self) -> ProgressWatcher {
		let watcher = ProgressWatcher::new(Duration::from_millis(self.progress_poll_interval_ms));
		match self.progress_timeout_secs {
			Some(secs) => watcher.with_timeout(Duration::from_secs(secs)),
			None => watcher,
		}
	}

	/// Check the settings after merging
	pub fn validate(&self) -> ConfResult<()> {
		self.base_url()?;
		if self.request_timeout_secs == 0 {
			return Err(ConfError::Invalid {
				key: "request_timeout_secs",
				message: "must be greater than zero".to_string(),
			});
		}
		if self.progress_poll_interval_ms == 0 {
			return Err(ConfError::Invalid {
				key: "progress_poll_interval_ms",
				message: "must be greater than zero".to_string(),
			});
		}
		if self.locale.as_deref().is_some_and(|l| l.trim().is_empty()) {
			return Err(ConfError::Invalid {
				key: "locale",
				message: "must not be blank".to_string(),
			});
		}
		Ok(())
	}
}

/// Merges configuration sources into [`ClientSettings`]
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Create a builder without sources
	pub fn new() -> Self {
		Self::default()
	}

	/// Defaults of every setting as a source
	pub fn default_source() -> DefaultSource {
		let defaults = ClientSettings::default();
		let mut source = DefaultSource::new()
			.with_value("base_url", Value::from(defaults.base_url))
			.with_value("request_timeout_secs", Value::from(defaults.request_timeout_secs))
			.with_value(
				"progress_poll_interval_ms",
				Value::from(defaults.progress_poll_interval_ms),
			)
			.with_value("user_agent", Value::from(defaults.user_agent));
		if let Some(locale) = defaults.locale {
			source = source.with_value("locale", Value::from(locale));
		}
		source
	}

	/// Add a source
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merge all sources, higher priority last, and validate the result
	pub fn build(mut self) -> ConfResult<ClientSettings> {
		self.sources.sort_by_key(|s| s.priority());

		let mut merged: IndexMap<String, Value> = IndexMap::new();
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(source = %source.description(), keys = values.len(), "Loaded configuration source");
			merged.extend(values);
		}

		let object: serde_json::Map<String, Value> = merged.into_iter().collect();
		let settings: ClientSettings =
			serde_json::from_value(Value::Object(object)).map_err(|e| ConfError::Deserialize(e.to_string()))?;
		settings.validate()?;
		Ok(settings)
	}
}
