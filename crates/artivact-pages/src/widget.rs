//! Polymorphic page widgets
//!
//! A [`Widget`] is a typed, positioned content block. The common attributes
//! live on the widget itself while the type-specific payload is a
//! [`WidgetKind`] keyed by the `type` tag. The payload is private so the type
//! of an existing widget can never change; mutation goes through
//! [`Widget::payload_mut`], which only exposes the fields of the current type.

use crate::error::{PageError, PageResult};
use artivact_core::restriction::Restricted;
use artivact_core::serde_util::null_default;
use artivact_i18n::{Translatable, TranslatableString};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Type tag of a widget, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetType {
	/// Hero image with title and subtitle
	PageTitle,
	/// Heading and text block
	Text,
	/// Colored text box
	InfoBox,
	/// Predefined or interactive item search
	ItemSearch,
	/// Portrait with subtext
	Avatar,
	/// Image gallery with optional text
	ImageGallery,
	/// Grid of link buttons
	Buttons,
}

impl WidgetType {
	/// Every widget type in catalog order
	pub const ALL: [WidgetType; 7] = [
		WidgetType::PageTitle,
		WidgetType::Text,
		WidgetType::InfoBox,
		WidgetType::ItemSearch,
		WidgetType::Avatar,
		WidgetType::ImageGallery,
		WidgetType::Buttons,
	];

	/// The tag as used on the wire
	pub fn as_str(self) -> &'static str {
		match self {
			WidgetType::PageTitle => "PAGE_TITLE",
			WidgetType::Text => "TEXT",
			WidgetType::InfoBox => "INFO_BOX",
			WidgetType::ItemSearch => "ITEM_SEARCH",
			WidgetType::Avatar => "AVATAR",
			WidgetType::ImageGallery => "IMAGE_GALLERY",
			WidgetType::Buttons => "BUTTONS",
		}
	}
}

impl fmt::Display for WidgetType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for WidgetType {
	type Err = PageError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		WidgetType::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| PageError::UnknownWidgetType(s.to_string()))
	}
}

/// A configurable link button
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonConfig {
	pub target_url: Option<String>,
	pub icon_left: Option<String>,
	#[serde(deserialize_with = "null_default")]
	pub label: TranslatableString,
	pub icon_right: Option<String>,
	pub size: Option<f64>,
	pub button_color: Option<String>,
	pub text_color: Option<String>,
}

/// Severity of an info box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InfoBoxType {
	#[default]
	Info,
	Warn,
	Alert,
}

impl InfoBoxType {
	/// CSS modifier used by the viewer
	pub fn css_class(self) -> &'static str {
		match self {
			InfoBoxType::Info => "info",
			InfoBoxType::Warn => "warn",
			InfoBoxType::Alert => "alert",
		}
	}
}

/// Placement of the text of an image gallery
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextPosition {
	#[default]
	Top,
	Left,
	Right,
}

/// Payload of a `PAGE_TITLE` widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageTitleWidget {
	#[serde(deserialize_with = "null_default")]
	pub title: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub subtitle: TranslatableString,
	pub background_image: Option<String>,
	#[serde(deserialize_with = "null_default")]
	pub button_configs: Vec<ButtonConfig>,
}

/// Payload of a `TEXT` widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextWidget {
	#[serde(deserialize_with = "null_default")]
	pub heading: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub content: TranslatableString,
}

/// Payload of an `INFO_BOX` widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoBoxWidget {
	#[serde(deserialize_with = "null_default")]
	pub heading: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub content: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub box_type: InfoBoxType,
	pub outlined: bool,
}

/// Payload of an `ITEM_SEARCH` widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemSearchWidget {
	#[serde(deserialize_with = "null_default")]
	pub heading: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub content: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub search_term: String,
	pub max_results: u32,
	pub page_size: u32,
}

/// Payload of an `AVATAR` widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarWidget {
	pub avatar_image: Option<String>,
	#[serde(deserialize_with = "null_default")]
	pub avatar_subtext: TranslatableString,
}

/// Payload of an `IMAGE_GALLERY` widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageGalleryWidget {
	#[serde(deserialize_with = "null_default")]
	pub heading: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub content: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub images: Vec<String>,
	pub fullscreen_allowed: bool,
	#[serde(deserialize_with = "null_default")]
	pub text_position: TextPosition,
	pub icon_mode: bool,
	pub hide_border: bool,
}

/// Payload of a `BUTTONS` widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonsWidget {
	pub columns: u32,
	#[serde(deserialize_with = "null_default")]
	pub button_configs: Vec<ButtonConfig>,
}

/// Type-specific payload, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetKind {
	PageTitle(PageTitleWidget),
	Text(TextWidget),
	InfoBox(InfoBoxWidget),
	ItemSearch(ItemSearchWidget),
	Avatar(AvatarWidget),
	ImageGallery(ImageGalleryWidget),
	Buttons(ButtonsWidget),
}

impl WidgetKind {
	/// The type tag of this payload
	pub fn widget_type(&self) -> WidgetType {
		match self {
			WidgetKind::PageTitle(_) => WidgetType::PageTitle,
			WidgetKind::Text(_) => WidgetType::Text,
			WidgetKind::InfoBox(_) => WidgetType::InfoBox,
			WidgetKind::ItemSearch(_) => WidgetType::ItemSearch,
			WidgetKind::Avatar(_) => WidgetType::Avatar,
			WidgetKind::ImageGallery(_) => WidgetType::ImageGallery,
			WidgetKind::Buttons(_) => WidgetType::Buttons,
		}
	}
}

/// Mutable view on a widget payload that cannot change the widget type
#[derive(Debug)]
pub enum WidgetPayloadMut<'a> {
	PageTitle(&'a mut PageTitleWidget),
	Text(&'a mut TextWidget),
	InfoBox(&'a mut InfoBoxWidget),
	ItemSearch(&'a mut ItemSearchWidget),
	Avatar(&'a mut AvatarWidget),
	ImageGallery(&'a mut ImageGalleryWidget),
	Buttons(&'a mut ButtonsWidget),
}

/// Whether a file is being attached to or detached from a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
	Add,
	Remove,
}

/// A typed content block of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
	/// Backend-assigned id, empty until the first save
	#[serde(default, deserialize_with = "null_default")]
	pub id: String,
	/// Roles allowed to see the widget
	#[serde(default, deserialize_with = "null_default")]
	pub restrictions: BTreeSet<String>,
	/// Optional title used in the page's anchor navigation
	#[serde(default, deserialize_with = "null_default")]
	pub navigation_title: TranslatableString,
	#[serde(flatten)]
	kind: WidgetKind,
}

impl Widget {
	/// Create a widget without id from a payload
	pub fn new(kind: WidgetKind) -> Self {
		Self {
			id: String::new(),
			restrictions: BTreeSet::new(),
			navigation_title: TranslatableString::default(),
			kind,
		}
	}

	/// Set the id
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = id.into();
		self
	}

	/// The immutable type tag
	pub fn widget_type(&self) -> WidgetType {
		self.kind.widget_type()
	}

	/// Read access to the payload
	pub fn payload(&self) -> &WidgetKind {
		&self.kind
	}

	/// Write access to the payload fields of the current type
	pub fn payload_mut(&mut self) -> WidgetPayloadMut<'_> {
		match &mut self.kind {
			WidgetKind::PageTitle(p) => WidgetPayloadMut::PageTitle(p),
			WidgetKind::Text(p) => WidgetPayloadMut::Text(p),
			WidgetKind::InfoBox(p) => WidgetPayloadMut::InfoBox(p),
			WidgetKind::ItemSearch(p) => WidgetPayloadMut::ItemSearch(p),
			WidgetKind::Avatar(p) => WidgetPayloadMut::Avatar(p),
			WidgetKind::ImageGallery(p) => WidgetPayloadMut::ImageGallery(p),
			WidgetKind::Buttons(p) => WidgetPayloadMut::Buttons(p),
		}
	}

	/// Replace the payload, keeping the type
	pub fn set_payload(&mut self, kind: WidgetKind) -> PageResult<()> {
		if kind.widget_type() != self.widget_type() {
			return Err(PageError::PayloadMismatch {
				expected: self.widget_type(),
				actual: kind.widget_type(),
			});
		}
		self.kind = kind;
		Ok(())
	}

	/// Files referenced by the widget
	pub fn used_files(&self) -> Vec<&str> {
		match &self.kind {
			WidgetKind::ImageGallery(p) => p.images.iter().map(String::as_str).collect(),
			WidgetKind::Avatar(p) => p.avatar_image.as_deref().into_iter().collect(),
			WidgetKind::PageTitle(p) => p.background_image.as_deref().into_iter().collect(),
			_ => Vec::new(),
		}
	}

	/// Whether the widget stores uploaded files
	pub fn processes_files(&self) -> bool {
		matches!(
			self.kind,
			WidgetKind::ImageGallery(_) | WidgetKind::Avatar(_) | WidgetKind::PageTitle(_)
		)
	}

	/// Attach or detach an uploaded file
	///
	/// Galleries append and remove images; avatars and page titles hold a
	/// single image that is replaced or cleared. Other widgets ignore files.
	pub fn process_file(&mut self, filename: &str, operation: FileOperation) {
		match (&mut self.kind, operation) {
			(WidgetKind::ImageGallery(p), FileOperation::Add) => p.images.push(filename.to_string()),
			(WidgetKind::ImageGallery(p), FileOperation::Remove) => p.images.retain(|i| i != filename),
			(WidgetKind::Avatar(p), FileOperation::Add) => p.avatar_image = Some(filename.to_string()),
			(WidgetKind::Avatar(p), FileOperation::Remove) => {
				if p.avatar_image.as_deref() == Some(filename) {
					p.avatar_image = None;
				}
			}
			(WidgetKind::PageTitle(p), FileOperation::Add) => {
				p.background_image = Some(filename.to_string())
			}
			(WidgetKind::PageTitle(p), FileOperation::Remove) => {
				if p.background_image.as_deref() == Some(filename) {
					p.background_image = None;
				}
			}
			_ => {}
		}
	}
}

impl Restricted for Widget {
	fn id(&self) -> &str {
		&self.id
	}

	fn restrictions(&self) -> &BTreeSet<String> {
		&self.restrictions
	}
}

impl Translatable for ButtonConfig {
	fn translate(&mut self, locale: Option<&str>) {
		self.label.translate(locale);
	}
}

impl Translatable for Widget {
	fn translate(&mut self, locale: Option<&str>) {
		self.navigation_title.translate(locale);
		match &mut self.kind {
			WidgetKind::PageTitle(p) => {
				p.title.translate(locale);
				p.subtitle.translate(locale);
				p.button_configs.translate(locale);
			}
			WidgetKind::Text(TextWidget { heading, content })
			| WidgetKind::InfoBox(InfoBoxWidget { heading, content, .. })
			| WidgetKind::ItemSearch(ItemSearchWidget { heading, content, .. })
			| WidgetKind::ImageGallery(ImageGalleryWidget { heading, content, .. }) => {
				heading.translate(locale);
				content.translate(locale);
			}
			WidgetKind::Avatar(p) => p.avatar_subtext.translate(locale),
			WidgetKind::Buttons(p) => p.button_configs.translate(locale),
		}
	}
}

/// Decode a widget list, skipping entries whose type is unknown or missing
///
/// A widget with a known type but a malformed payload is still an error.
pub fn deserialize_widgets<'de, D>(deserializer: D) -> Result<Vec<Widget>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw: Option<Vec<JsonValue>> = Option::deserialize(deserializer)?;
	let mut widgets = Vec::new();
	for value in raw.unwrap_or_default() {
		let tag = value.get("type").and_then(JsonValue::as_str);
		match tag.map(WidgetType::from_str) {
			Some(Ok(_)) => {
				let widget = serde_json::from_value(value).map_err(serde::de::Error::custom)?;
				widgets.push(widget);
			}
			_ => {
				tracing::warn!(widget_type = ?tag, "No widget found for type, ignoring widget");
			}
		}
	}
	Ok(widgets)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_widget_type_round_trips_through_str() {
		for widget_type in WidgetType::ALL {
			assert_eq!(widget_type.as_str().parse::<WidgetType>().unwrap(), widget_type);
		}
		assert!(matches!(
			"CAROUSEL".parse::<WidgetType>(),
			Err(PageError::UnknownWidgetType(_))
		));
	}

	#[rstest]
	fn test_deserialize_fills_missing_fields() {
		let json = json!({
			"id": "w1",
			"type": "PAGE_TITLE",
			"title": { "value": "Welcome" },
			"restrictions": null
		});

		let widget: Widget = serde_json::from_value(json).unwrap();

		assert_eq!(widget.widget_type(), WidgetType::PageTitle);
		assert_eq!(widget.navigation_title, TranslatableString::default());
		let WidgetKind::PageTitle(payload) = widget.payload() else {
			panic!("expected page title payload");
		};
		assert_eq!(payload.title.value, "Welcome");
		assert_eq!(payload.subtitle, TranslatableString::default());
		assert!(payload.button_configs.is_empty());
	}

	#[rstest]
	fn test_serializes_type_tag_next_to_common_fields() {
		let widget = Widget::new(WidgetKind::InfoBox(InfoBoxWidget {
			box_type: InfoBoxType::Warn,
			..Default::default()
		}))
		.with_id("w2");

		let json = serde_json::to_value(&widget).unwrap();

		assert_eq!(json["type"], "INFO_BOX");
		assert_eq!(json["id"], "w2");
		assert_eq!(json["boxType"], "WARN");
	}

	#[rstest]
	fn test_set_payload_rejects_type_change() {
		let mut widget = Widget::new(WidgetKind::Text(TextWidget::default()));

		let result = widget.set_payload(WidgetKind::Buttons(ButtonsWidget::default()));

		assert!(matches!(
			result,
			Err(PageError::PayloadMismatch {
				expected: WidgetType::Text,
				actual: WidgetType::Buttons
			})
		));
		assert_eq!(widget.widget_type(), WidgetType::Text);
	}

	#[rstest]
	fn test_gallery_processes_files_in_order() {
		let mut widget = Widget::new(WidgetKind::ImageGallery(ImageGalleryWidget::default()));

		widget.process_file("a.jpg", FileOperation::Add);
		widget.process_file("b.jpg", FileOperation::Add);
		widget.process_file("c.jpg", FileOperation::Add);
		widget.process_file("b.jpg", FileOperation::Remove);

		assert_eq!(widget.used_files(), vec!["a.jpg", "c.jpg"]);
	}

	#[rstest]
	fn test_avatar_remove_only_clears_matching_file() {
		let mut widget = Widget::new(WidgetKind::Avatar(AvatarWidget::default()));
		widget.process_file("me.png", FileOperation::Add);

		widget.process_file("other.png", FileOperation::Remove);

		assert_eq!(widget.used_files(), vec!["me.png"]);
	}

	#[rstest]
	fn test_payload_mut_edits_fields() {
		let mut widget = Widget::new(WidgetKind::Text(TextWidget::default()));

		if let WidgetPayloadMut::Text(text) = widget.payload_mut() {
			text.heading = "Intro".into();
		}

		let WidgetKind::Text(text) = widget.payload() else {
			panic!("expected text payload");
		};
		assert_eq!(text.heading.value, "Intro");
	}
}
