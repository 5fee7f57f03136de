//! Public configuration and account data

use artivact_core::SessionContext;
use artivact_core::serde_util::null_default;
use artivact_i18n::TranslatableString;
use serde::{Deserialize, Serialize};

/// The user behind a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserData {
	pub authenticated: bool,
	#[serde(deserialize_with = "null_default")]
	pub roles: Vec<String>,
	#[serde(deserialize_with = "null_default")]
	pub username: String,
}

impl UserData {
	/// Session context of this user, viewing in `locale`
	pub fn session_context(&self, locale: Option<&str>) -> SessionContext {
		let context = if self.authenticated {
			SessionContext::authenticated(self.username.clone(), self.roles.iter().cloned())
		} else {
			SessionContext::anonymous()
		};
		match locale {
			Some(locale) => context.with_locale(locale),
			None => context,
		}
	}
}

/// Runtime profiles of the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profiles {
	pub desktop: bool,
	pub e2e: bool,
}

/// Colors of the user interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorTheme {
	pub primary: String,
	pub secondary: String,
	pub accent: String,
	pub dark: String,
	pub positive: String,
	pub negative: String,
	pub info: String,
	pub warning: String,
}

/// License notice shown in the footer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct License {
	#[serde(deserialize_with = "null_default")]
	pub prefix: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub license_label: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub suffix: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub license_url: String,
}

/// Settings every visitor may read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationSettings {
	pub application_title: String,
	#[serde(deserialize_with = "null_default")]
	pub available_locales: Vec<String>,
	pub application_locale: Option<String>,
	#[serde(deserialize_with = "null_default")]
	pub color_theme: ColorTheme,
	#[serde(deserialize_with = "null_default")]
	pub license: License,
	pub profiles: Profiles,
	#[serde(deserialize_with = "null_default")]
	pub available_roles: Vec<String>,
	pub sync_available: bool,
}

impl ApplicationSettings {
	/// Whether `locale` is one of the configured locales
	pub fn supports_locale(&self, locale: &str) -> bool {
		self.available_locales.iter().any(|l| l == locale)
	}
}
