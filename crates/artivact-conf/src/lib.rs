//! # Artivact Conf
//!
//! Layered settings of the Artivact backend client.
//!
//! Settings are merged from defaults, an optional TOML file and environment
//! variables prefixed with `ARTIVACT_`, then validated.
//!
//! ```no_run
//! use artivact_conf::ClientSettings;
//!
//! let settings = ClientSettings::load(Some("artivact.toml".into())).unwrap();
//! println!("{}", settings.base_url().unwrap());
//! ```

pub mod settings;
pub mod sources;

/// Prefix of environment variables read by [`sources::EnvSource`]
pub const ENV_PREFIX: &str = "ARTIVACT_";

/// Configuration error types
pub mod error {
	use crate::sources::SourceError;
	use thiserror::Error;

	/// Configuration errors
	#[derive(Error, Debug)]
	pub enum ConfError {
		/// A source could not be read
		#[error(transparent)]
		Source(#[from] SourceError),

		/// The merged values do not form valid settings
		#[error("Invalid settings: {0}")]
		Deserialize(String),

		/// A setting has an invalid value
		#[error("Invalid value for '{key}': {message}")]
		Invalid {
			/// Setting name
			key: &'static str,
			/// What is wrong
			message: String,
		},
	}

	/// Result type for configuration
	pub type ConfResult<T> = Result<T, ConfError>;
}

pub use error::{ConfError, ConfResult};
pub use settings::{ClientSettings, DEFAULT_BASE_URL, SettingsBuilder};
