//! Entity identifiers

use uuid::Uuid;

/// Generate a new random entity id in the backend's format
pub fn generate_id() -> String {
	Uuid::new_v4().to_string()
}

/// Whether `value` is a UUID rather than a page alias
pub fn is_uuid(value: &str) -> bool {
	Uuid::parse_str(value).is_ok()
}
