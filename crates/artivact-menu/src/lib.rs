//! # Artivact Menu
//!
//! The navigation tree: top-level menus with nested entries, each optionally
//! bound to a page or linking to external content.
//!
//! ## Features
//!
//! - **Menu model**: classification, validation and lookups over the menu forest
//! - **Editor**: create, delete, reorder and relocate nodes through the backend
//! - **Exchange**: export configuration and archive naming for menu export/import

pub mod api;
pub mod editor;
pub mod exchange;
pub mod menu;

pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use crate::api::MenuApi;
	pub use crate::editor::{MenuEditor, RelocationTarget};
	pub use crate::error::{MenuError, MenuResult};
	pub use crate::exchange::{ExportConfiguration, MenuExport};
	pub use crate::menu::{Menu, MenuKind};
}

/// Menu error types
pub mod error {
	use artivact_core::ApiError;
	use thiserror::Error;

	/// Menu-related errors
	#[derive(Error, Debug, Clone, PartialEq, Eq)]
	pub enum MenuError {
		/// Input rejected before contacting the backend
		#[error("Validation failed: {0}")]
		Validation(String),

		/// Menu not found
		#[error("Menu not found: {0}")]
		UnknownMenu(String),

		/// Invalid menu hierarchy (e.g., moving a menu into its own entries)
		#[error("Invalid menu hierarchy: {0}")]
		InvalidHierarchy(String),

		/// Backend communication failed
		#[error(transparent)]
		Api(#[from] ApiError),
	}

	/// Result type for menu operations
	pub type MenuResult<T> = Result<T, MenuError>;
}

pub use api::MenuApi;
pub use editor::{MenuEditor, RelocationTarget};
pub use error::{MenuError, MenuResult};
pub use exchange::{ExportConfiguration, MenuExport};
pub use menu::{Menu, MenuKind};
