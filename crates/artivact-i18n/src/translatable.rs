//! Translatable strings

use artivact_core::serde_util::null_default;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user-facing string with a default value and per-locale translations
///
/// `translated_value` is filled in by the backend for the locale of the
/// request; `translations` holds every translation the editors entered.
///
/// # Example
/// ```
/// use artivact_i18n::TranslatableString;
///
/// let title = TranslatableString::new("Welcome").with_translation("de", "Willkommen");
///
/// assert_eq!(title.resolve(Some("de"), false), "Willkommen");
/// assert_eq!(title.resolve(Some("fr"), false), "Welcome");
/// assert_eq!(title.resolve(None, true), "Welcome");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatableString {
	/// Default text, always present
	#[serde(default, deserialize_with = "null_default")]
	pub value: String,
	/// Text resolved by the backend for the request locale
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub translated_value: Option<String>,
	/// Locale to translation
	#[serde(default, deserialize_with = "null_default")]
	pub translations: BTreeMap<String, String>,
}

impl TranslatableString {
	/// Create a value without translations
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			translated_value: None,
			translations: BTreeMap::new(),
		}
	}

	/// Add a translation for `locale`
	pub fn with_translation(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
		self.translations.insert(locale.into(), text.into());
		self
	}

	/// Set or replace the translation for `locale`
	pub fn set_translation(&mut self, locale: impl Into<String>, text: impl Into<String>) {
		self.translations.insert(locale.into(), text.into());
	}

	/// The text to display for a viewer; see [`resolve`]
	pub fn resolve(&self, active_locale: Option<&str>, privileged: bool) -> String {
		resolve(self, active_locale, privileged)
	}

	/// Compute `translated_value` for `locale` the way the backend does
	///
	/// An exact match wins; otherwise a translation whose key is a language
	/// prefix of `locale` (`de` for `de_DE`) is used; otherwise the default value.
	pub fn translate(&mut self, locale: Option<&str>) {
		self.translated_value = Some(self.translation_for(locale).to_string());
	}

	fn translation_for(&self, locale: Option<&str>) -> &str {
		let Some(locale) = locale.filter(|l| !l.is_empty()) else {
			return &self.value;
		};
		if let Some(exact) = self.translations.get(locale) {
			return exact;
		}
		self.translations
			.iter()
			.find(|(key, _)| {
				locale
					.strip_prefix(key.as_str())
					.is_some_and(|rest| rest.starts_with('_'))
			})
			.map(|(_, text)| text.as_str())
			.unwrap_or(&self.value)
	}

	/// Drop the backend-resolved value
	pub fn clear_translated(&mut self) {
		self.translated_value = None;
	}

	/// Drop empty translations and the backend-resolved value
	pub fn cleanup_translations(&mut self) {
		self.translated_value = None;
		self.translations.retain(|_, text| !text.trim().is_empty());
	}

	/// Whether neither the default value nor any translation has content
	pub fn is_blank(&self) -> bool {
		self.value.trim().is_empty() && self.translations.values().all(|t| t.trim().is_empty())
	}
}

impl From<&str> for TranslatableString {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for TranslatableString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

/// Resolve the text shown to a viewer
///
/// 1. No active locale and a privileged viewer: the default value, so editors
///    always see what they typed.
/// 2. An active locale with a non-empty translation: that translation.
/// 3. A non-empty backend-resolved value: that value.
/// 4. Otherwise the default value.
pub fn resolve(value: &TranslatableString, active_locale: Option<&str>, privileged: bool) -> String {
	let Some(locale) = active_locale else {
		if privileged {
			return value.value.clone();
		}
		return fallback(value);
	};
	match value.translations.get(locale) {
		Some(text) if !text.is_empty() => text.clone(),
		_ => fallback(value),
	}
}

fn fallback(value: &TranslatableString) -> String {
	match &value.translated_value {
		Some(translated) if !translated.is_empty() => translated.clone(),
		_ => value.value.clone(),
	}
}

/// Types whose translatable strings can be resolved in place for a locale
pub trait Translatable {
	/// Set `translated_value` of every contained [`TranslatableString`]
	fn translate(&mut self, locale: Option<&str>);
}

impl Translatable for TranslatableString {
	fn translate(&mut self, locale: Option<&str>) {
		TranslatableString::translate(self, locale);
	}
}

impl<T: Translatable> Translatable for Vec<T> {
	fn translate(&mut self, locale: Option<&str>) {
		for item in self {
			item.translate(locale);
		}
	}
}
