//! Navigation menu module.
//!
//! # Examples
//!
//! ```rust,no_run
//! use artivact::menu::{MenuEditor, RelocationTarget};
//! ```

pub use artivact_menu::*;
