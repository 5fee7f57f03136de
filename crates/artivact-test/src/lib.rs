//! # Artivact Test
//!
//! Testing utilities for the Artivact page model.
//!
//! ## Contents
//!
//! - [`backend`]: an in-memory backend with server-side page and menu semantics
//! - [`confirm`]: a scripted [`Confirmer`](artivact_core::Confirmer)
//! - [`fixtures`]: rstest fixtures for sessions, pages and menus
//! - [`logging`]: tracing output for tests
//!
//! ## Example
//!
//! ```rust
//! use artivact_test::fixtures::{admin_context, museum_backend, museum_menus, staff_page, welcome_page};
//! use artivact_test::ScriptedConfirmer;
//!
//! let backend = museum_backend(welcome_page(), staff_page(), museum_menus());
//! let session = backend.session(admin_context());
//! let confirmer = ScriptedConfirmer::accepting();
//! # drop((session, confirmer));
//! ```

pub mod backend;
pub mod confirm;
pub mod fixtures;
pub mod logging;

pub use backend::{BackendCall, MemoryBackend, MemorySession};
pub use confirm::ScriptedConfirmer;
