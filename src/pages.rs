//! Editable pages module.
//!
//! Widgets, the widget registry and the page edit session.
//!
//! # Examples
//!
//! ```rust,no_run
//! use artivact::pages::{PageEditSession, WidgetRegistry, WidgetType};
//! ```

pub use artivact_pages::*;
