//! # Artivact Client
//!
//! HTTP client for the Artivact backend.
//!
//! [`ArtivactClient`] implements [`PageApi`](artivact_pages::api::PageApi),
//! [`MenuApi`](artivact_menu::api::MenuApi) and
//! [`ProgressSource`](artivact_core::ProgressSource), so page edit sessions
//! and menu editors run against a live backend without further glue.
//!
//! ## Example
//!
//! ```rust,no_run
//! use artivact_client::ArtivactClient;
//! use artivact_conf::ClientSettings;
//! use artivact_pages::{PageEditSession, WidgetRegistry};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(ArtivactClient::new(&ClientSettings::load(None)?)?);
//! client.login("admin", "secret").await?;
//! let context = client.session_context().await?;
//!
//! let mut session = PageEditSession::open(client.clone(), "welcome", context).await?;
//! session.enter_edit().await?;
//! println!("{}", session.render(&WidgetRegistry::with_builtins())?);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
mod menus;
mod pages;
mod progress;

pub use auth::{ApplicationSettings, ColorTheme, License, Profiles, UserData};
pub use client::ArtivactClient;
pub use error::{ArtivactError, ArtivactResult};

/// Error types folding every crate of the page model
pub mod error {
	use artivact_conf::ConfError;
	use artivact_core::{ApiError, ProgressError};
	use artivact_menu::MenuError;
	use artivact_pages::PageError;
	use thiserror::Error;

	/// Errors surfaced to users of the client
	#[derive(Error, Debug)]
	pub enum ArtivactError {
		/// Communication with the backend failed
		#[error(transparent)]
		Api(#[from] ApiError),

		/// Page editing failed
		#[error(transparent)]
		Page(#[from] PageError),

		/// Menu editing failed
		#[error(transparent)]
		Menu(#[from] MenuError),

		/// Client settings are invalid
		#[error(transparent)]
		Conf(#[from] ConfError),

		/// A long-running operation failed or timed out
		#[error(transparent)]
		Progress(#[from] ProgressError),

		/// The HTTP client could not be created
		#[error("Failed to build HTTP client: {0}")]
		Client(String),
	}

	/// Result type for client operations
	pub type ArtivactResult<T> = Result<T, ArtivactError>;
}
