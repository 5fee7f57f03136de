//! Client configuration module.
//!
//! # Examples
//!
//! ```rust,no_run
//! use artivact::conf::{ClientSettings, SettingsBuilder};
//! ```

pub use artivact_conf::*;
