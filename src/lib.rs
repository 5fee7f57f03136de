//! # Artivact
//!
//! Client-side editable page model of the Artivact collection manager.
//!
//! Pages are ordered lists of typed widgets. Editors switch a page into edit
//! mode, change its work-in-progress copy, and publish or reset it. The
//! navigation menu tree links top-level menus and their entries to pages.
//! Every user-facing text is a translatable value resolved against the
//! viewer's locale.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All crates below
//! - `minimal` - Page model only
//! - `pages` - Widgets, widget registry and page edit session
//! - `menu` - Menu tree and menu editor
//! - `client` - HTTP client for the backend
//! - `conf` - Layered client configuration
//! - `test` - In-memory backend and fixtures for tests
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use artivact::prelude::*;
//! use std::sync::Arc;
//!
//! let client = Arc::new(ArtivactClient::new(&ClientSettings::load(None)?)?);
//! client.login("admin", "secret").await?;
//!
//! let mut session = PageEditSession::open(client.clone(), "welcome", client.session_context().await?).await?;
//! session.enter_edit().await?;
//! session.add_widget(&WidgetRegistry::with_builtins(), WidgetType::Text, None).await?;
//! session.publish(&AlwaysConfirm).await?;
//! ```

pub use artivact_core as core;
pub use artivact_i18n as i18n;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "menu")]
pub mod menu;
#[cfg(feature = "pages")]
pub mod pages;

pub use artivact_core::{
	ApiError, ApiResult, ConfirmRequest, Confirmer, MoveDirection, OperationProgress, SessionContext,
};
pub use artivact_i18n::{LocaleContext, TranslatableString};

#[cfg(feature = "pages")]
pub use artivact_pages::{
	EditMode, PageContent, PageEditSession, PageError, PageResult, Widget, WidgetRegistry, WidgetType,
};

#[cfg(feature = "menu")]
pub use artivact_menu::{Menu, MenuEditor, MenuError, MenuResult, RelocationTarget};

#[cfg(feature = "client")]
pub use artivact_client::{ArtivactClient, ArtivactError, ArtivactResult};

#[cfg(feature = "conf")]
pub use artivact_conf::ClientSettings;

/// Convenient re-exports of commonly used items
pub mod prelude {
	pub use artivact_core::prelude::*;
	pub use artivact_i18n::{LocaleContext, Translatable, TranslatableString};

	#[cfg(feature = "pages")]
	pub use artivact_pages::prelude::*;

	#[cfg(feature = "menu")]
	pub use artivact_menu::prelude::*;

	#[cfg(feature = "client")]
	pub use artivact_client::{ArtivactClient, ArtivactError, ArtivactResult};

	#[cfg(feature = "conf")]
	pub use artivact_conf::{ClientSettings, SettingsBuilder};
}
