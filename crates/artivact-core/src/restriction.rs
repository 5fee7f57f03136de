//! Role-based restrictions
//!
//! Every restricted entity carries a set of role names. An empty set means the
//! entity is visible to everyone; otherwise the viewer needs at least one of
//! the listed roles.

use std::collections::BTreeSet;

/// Role names known to the backend
pub mod roles {
	/// Administrators may edit everything
	pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

	/// Registered users
	pub const ROLE_USER: &str = "ROLE_USER";
}

/// Check whether a viewer holding `roles` may see an entity with `restrictions`
///
/// # Examples
///
/// ```
/// use artivact_core::restriction::is_allowed;
/// use std::collections::BTreeSet;
///
/// let open = BTreeSet::new();
/// let admin_only: BTreeSet<String> = ["ROLE_ADMIN".to_string()].into();
/// let user: BTreeSet<String> = ["ROLE_USER".to_string()].into();
///
/// assert!(is_allowed(&open, &user));
/// assert!(!is_allowed(&admin_only, &user));
/// ```
pub fn is_allowed(restrictions: &BTreeSet<String>, roles: &BTreeSet<String>) -> bool {
	restrictions.is_empty() || restrictions.iter().any(|r| roles.contains(r))
}

/// An entity with a backend-assigned identity and role restrictions
pub trait Restricted {
	/// The entity id (empty until assigned by the backend)
	fn id(&self) -> &str;

	/// Role names permitted to view the entity
	fn restrictions(&self) -> &BTreeSet<String>;

	/// Whether a viewer with the given roles may see this entity
	fn is_allowed(&self, roles: &BTreeSet<String>) -> bool {
		is_allowed(self.restrictions(), roles)
	}
}

/// Remove every item the viewer is not allowed to see, keeping the order of the rest
pub fn retain_allowed<T: Restricted>(items: &mut Vec<T>, roles: &BTreeSet<String>) {
	items.retain(|item| item.is_allowed(roles));
}
