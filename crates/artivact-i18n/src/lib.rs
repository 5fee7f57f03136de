//! # Artivact I18n
//!
//! Translatable strings as exchanged with the Artivact backend, and the pure
//! resolver that picks the text shown to a viewer.
//!
//! ## Example
//!
//! ```
//! use artivact_i18n::{LocaleContext, TranslatableString};
//!
//! let heading = TranslatableString::new("Hello").with_translation("de", "Hallo");
//! let ctx = LocaleContext::anonymous().with_locale("de");
//!
//! assert_eq!(ctx.resolve(&heading), "Hallo");
//! ```

pub mod context;
pub mod translatable;

pub use context::LocaleContext;
pub use translatable::{Translatable, TranslatableString, resolve};
