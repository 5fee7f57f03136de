//! Menu export and import archives

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Suffix of exported menu archives
pub const MENU_EXPORT_SUFFIX: &str = "artivact.menu.zip";

/// Options applied when exporting a menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfiguration {
	/// Reduce media to smaller renditions
	pub optimize_size: bool,
	/// Leave out restricted entries
	pub apply_restrictions: bool,
	/// Leave out collection items bound to the pages
	pub exclude_items: bool,
}

impl ExportConfiguration {
	/// Query parameters understood by the export endpoint
	pub fn query_pairs(&self) -> [(&'static str, String); 3] {
		[
			("optimizeSize", self.optimize_size.to_string()),
			("applyRestrictions", self.apply_restrictions.to_string()),
			("excludeItems", self.exclude_items.to_string()),
		]
	}
}

/// A downloaded menu archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuExport {
	pub file_name: String,
	pub bytes: Vec<u8>,
}

/// Default file name of an exported menu archive
///
/// # Examples
///
/// ```
/// use artivact_menu::exchange::export_file_name;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// assert_eq!(export_file_name("m1", date), "2024-05-01.m1.artivact.menu.zip");
/// ```
pub fn export_file_name(menu_id: &str, date: NaiveDate) -> String {
	format!("{}.{}.{}", date.format("%Y-%m-%d"), menu_id, MENU_EXPORT_SUFFIX)
}

/// Whether a file name looks like an exported menu archive
pub fn is_menu_export(file_name: &str) -> bool {
	file_name.ends_with(MENU_EXPORT_SUFFIX)
}

/// Stored name of a menu's cover picture, keeping the upload's extension
///
/// Returns `None` if `original` has no extension.
pub fn cover_picture_file_name(original: &str) -> Option<String> {
	let (stem, extension) = original.rsplit_once('.')?;
	if stem.is_empty() || extension.is_empty() {
		return None;
	}
	Some(format!("cover-picture.{}", extension.to_ascii_lowercase()))
}
