//! Serde helpers for lenient backend payloads

use serde::{Deserialize, Deserializer};

/// Deserialize a field that may be `null`, falling back to its default
///
/// Combine with `#[serde(default)]` to also cover absent fields.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whether an optional string holds something other than whitespace
pub fn has_text(value: Option<&str>) -> bool {
	value.is_some_and(|v| !v.trim().is_empty())
}
