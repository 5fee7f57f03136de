//! Locale context threaded through rendering

use crate::translatable::{TranslatableString, resolve};
use artivact_core::SessionContext;

/// The active locale and viewer kind used to resolve translatable strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleContext {
	active_locale: Option<String>,
	privileged: bool,
}

impl LocaleContext {
	/// Create a context
	pub fn new(active_locale: Option<String>, privileged: bool) -> Self {
		Self {
			active_locale,
			privileged,
		}
	}

	/// A public visitor without locale override
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// Derive the context from a viewer session
	pub fn from_session(session: &SessionContext) -> Self {
		Self::new(session.locale().map(str::to_string), session.is_privileged())
	}

	/// Replace the active locale
	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.active_locale = Some(locale.into());
		self
	}

	/// The active locale override
	pub fn active_locale(&self) -> Option<&str> {
		self.active_locale.as_deref()
	}

	/// Whether the viewer is an editor
	pub fn is_privileged(&self) -> bool {
		self.privileged
	}

	/// Resolve `value` for this context
	pub fn resolve(&self, value: &TranslatableString) -> String {
		resolve(value, self.active_locale(), self.privileged)
	}
}

impl From<&SessionContext> for LocaleContext {
	fn from(session: &SessionContext) -> Self {
		Self::from_session(session)
	}
}
