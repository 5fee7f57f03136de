//! HTTP client module.
//!
//! Connects page edit sessions and menu editors to a running backend.
//!
//! # Examples
//!
//! ```rust,no_run
//! use artivact::client::ArtivactClient;
//! ```

pub use artivact_client::*;
