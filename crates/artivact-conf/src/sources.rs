//! Configuration sources for layered client settings
//!
//! Sources are merged in priority order (environment variables > TOML file >
//! defaults).

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Environment variable configuration source
///
/// Keys are stripped of the prefix and lowercased, so `ARTIVACT_BASE_URL`
/// becomes `base_url`.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Read variables starting with `prefix`
	///
	/// # Examples
	///
	/// ```
	/// use artivact_conf::sources::EnvSource;
	///
	/// let source = EnvSource::with_prefix("ARTIVACT_");
	/// ```
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	fn parse_value(value: String) -> Value {
		if let Ok(num) = value.parse::<i64>() {
			Value::Number(num.into())
		} else if let Ok(b) = value.parse::<bool>() {
			Value::Bool(b)
		} else {
			Value::String(value)
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::with_prefix(crate::ENV_PREFIX)
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (key, value) in std::env::vars() {
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			if clean_key.is_empty() {
				continue;
			}
			config.insert(clean_key.to_lowercase(), Self::parse_value(value));
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// TOML file configuration source, skipped when the file does not exist
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;
		let json_value = serde_json::to_value(&toml_value)?;

		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Default values configuration source
#[derive(Default)]
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create an empty default source
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a default value for a configuration key
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::TempDir;

	#[test]
	fn test_toml_source() {
		let temp_dir = TempDir::new().unwrap();
		let config_path = temp_dir.path().join("artivact.toml");
		let mut file = fs::File::create(&config_path).unwrap();
		writeln!(
			file,
			r#"
base_url = "https://museum.example.org"
request_timeout_secs = 5
"#
		)
		.unwrap();

		let config = TomlFileSource::new(&config_path).load().unwrap();

		assert_eq!(
			config.get("base_url").unwrap(),
			&Value::String("https://museum.example.org".to_string())
		);
		assert_eq!(config.get("request_timeout_secs").unwrap(), &Value::from(5));
	}

	#[test]
	fn test_missing_toml_file_is_empty() {
		let config = TomlFileSource::new("does-not-exist.toml").load().unwrap();

		assert!(config.is_empty());
	}

	#[test]
	fn test_env_value_parsing() {
		assert_eq!(EnvSource::parse_value("30".into()), Value::from(30));
		assert_eq!(EnvSource::parse_value("true".into()), Value::Bool(true));
		assert_eq!(EnvSource::parse_value("de".into()), Value::String("de".into()));
	}

	#[test]
	fn test_source_priority() {
		assert_eq!(EnvSource::default().priority(), 100);
		assert_eq!(TomlFileSource::new("test.toml").priority(), 50);
		assert_eq!(DefaultSource::new().priority(), 0);
	}
}
