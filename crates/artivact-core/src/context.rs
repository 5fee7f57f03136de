//! Viewer session context
//!
//! Identity and locale are passed explicitly to everything that depends on
//! them instead of living in ambient global state.

use crate::restriction::roles;
use std::collections::BTreeSet;

/// Identity, roles and locale of the current viewer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
	username: Option<String>,
	roles: BTreeSet<String>,
	locale: Option<String>,
}

impl SessionContext {
	/// An unauthenticated visitor without locale override
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// An authenticated user holding the given roles
	///
	/// # Examples
	///
	/// ```
	/// use artivact_core::SessionContext;
	/// use artivact_core::roles::ROLE_ADMIN;
	///
	/// let ctx = SessionContext::authenticated("admin", [ROLE_ADMIN]);
	/// assert!(ctx.is_authenticated());
	/// assert!(ctx.is_privileged());
	/// ```
	pub fn authenticated<I, S>(username: impl Into<String>, roles: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			username: Some(username.into()),
			roles: roles.into_iter().map(Into::into).collect(),
			locale: None,
		}
	}

	/// Shorthand for an authenticated administrator
	pub fn admin(username: impl Into<String>) -> Self {
		Self::authenticated(username, [roles::ROLE_ADMIN, roles::ROLE_USER])
	}

	/// Set the active locale override
	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());
		self
	}

	/// Drop the active locale override
	pub fn without_locale(mut self) -> Self {
		self.locale = None;
		self
	}

	/// The authenticated username, if any
	pub fn username(&self) -> Option<&str> {
		self.username.as_deref()
	}

	/// The roles held by the viewer
	pub fn roles(&self) -> &BTreeSet<String> {
		&self.roles
	}

	/// The active locale override
	pub fn locale(&self) -> Option<&str> {
		self.locale.as_deref()
	}

	/// Whether the viewer is logged in
	pub fn is_authenticated(&self) -> bool {
		self.username.is_some()
	}

	/// Whether the viewer holds the given role
	pub fn has_role(&self, role: &str) -> bool {
		self.roles.contains(role)
	}

	/// Whether the viewer is an authenticated editor or administrator
	pub fn is_privileged(&self) -> bool {
		self.is_authenticated() && (self.has_role(roles::ROLE_ADMIN) || self.has_role(roles::ROLE_USER))
	}
}
