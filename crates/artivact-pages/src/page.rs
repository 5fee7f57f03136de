//! Page containers

use crate::error::{PageError, PageResult};
use crate::widget::{Widget, deserialize_widgets};
use artivact_core::ordering::{MoveDirection, swap_neighbor};
use artivact_core::restriction::{Restricted, roles};
use artivact_core::serde_util::null_default;
use artivact_i18n::{Translatable, TranslatableString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Descriptive page metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMetaData {
	#[serde(deserialize_with = "null_default")]
	pub title: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub description: TranslatableString,
	#[serde(deserialize_with = "null_default")]
	pub author: String,
	#[serde(deserialize_with = "null_default")]
	pub keywords: TranslatableString,
}

/// An ordered list of widgets plus metadata
///
/// Widget order is render order. Every operation here keeps the relative
/// order of widgets it does not explicitly move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
	#[serde(default, deserialize_with = "null_default")]
	pub id: String,
	#[serde(default, deserialize_with = "null_default")]
	pub restrictions: BTreeSet<String>,
	#[serde(default, deserialize_with = "deserialize_widgets")]
	pub widgets: Vec<Widget>,
	/// Whether the current viewer may enter edit mode
	#[serde(default)]
	pub editable: bool,
	#[serde(default, deserialize_with = "null_default")]
	pub meta_data: PageMetaData,
}

/// Id and alias of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageIdAndAlias {
	pub id: String,
	#[serde(default)]
	pub alias: Option<String>,
}

impl PageIdAndAlias {
	/// The alias if set, the id otherwise
	pub fn id_or_alias(&self) -> &str {
		match self.alias.as_deref() {
			Some(alias) if !alias.is_empty() => alias,
			_ => &self.id,
		}
	}
}

/// Entry of the in-page anchor navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
	pub widget_id: String,
	pub title: TranslatableString,
}

impl PageContent {
	/// Create an empty page
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			..Default::default()
		}
	}

	/// Position of the widget with `widget_id`
	pub fn widget_index(&self, widget_id: &str) -> Option<usize> {
		self.widgets.iter().position(|w| w.id == widget_id)
	}

	/// The widget with `widget_id`
	pub fn widget(&self, widget_id: &str) -> Option<&Widget> {
		self.widgets.iter().find(|w| w.id == widget_id)
	}

	/// Mutable access to the widget with `widget_id`
	pub fn widget_mut(&mut self, widget_id: &str) -> Option<&mut Widget> {
		self.widgets.iter_mut().find(|w| w.id == widget_id)
	}

	/// Insert `widget` at `index`, or append it when `index` is `None`
	///
	/// Returns the position the widget ended up at.
	pub fn insert_widget(&mut self, widget: Widget, index: Option<usize>) -> PageResult<usize> {
		let len = self.widgets.len();
		let index = index.unwrap_or(len);
		if index > len {
			return Err(PageError::IndexOutOfBounds { index, len });
		}
		self.widgets.insert(index, widget);
		Ok(index)
	}

	/// Remove the widget with `widget_id`
	pub fn remove_widget(&mut self, widget_id: &str) -> PageResult<Widget> {
		let index = self
			.widget_index(widget_id)
			.ok_or_else(|| PageError::UnknownWidget(widget_id.to_string()))?;
		Ok(self.widgets.remove(index))
	}

	/// Swap the widget with its neighbour
	///
	/// Returns `false` when the widget is already first (moving up) or last
	/// (moving down); the list is left untouched in that case.
	pub fn move_widget(&mut self, widget_id: &str, direction: MoveDirection) -> PageResult<bool> {
		let index = self
			.widget_index(widget_id)
			.ok_or_else(|| PageError::UnknownWidget(widget_id.to_string()))?;
		Ok(swap_neighbor(&mut self.widgets, index, direction))
	}

	/// Replace the widget at `index` with `widget`
	///
	/// The replacement must keep the type of the widget it replaces.
	pub fn replace_widget(&mut self, index: usize, widget: Widget) -> PageResult<()> {
		let len = self.widgets.len();
		let current = self
			.widgets
			.get_mut(index)
			.ok_or(PageError::IndexOutOfBounds { index, len })?;
		if current.widget_type() != widget.widget_type() {
			return Err(PageError::PayloadMismatch {
				expected: current.widget_type(),
				actual: widget.widget_type(),
			});
		}
		*current = widget;
		Ok(())
	}

	/// Whether a viewer with `roles` may edit the page
	///
	/// Any admin or user role appearing in a widget restriction must be held
	/// by the viewer.
	pub fn compute_editable(&self, viewer_roles: &BTreeSet<String>) -> bool {
		[roles::ROLE_ADMIN, roles::ROLE_USER].into_iter().all(|role| {
			let required = self.widgets.iter().any(|w| w.restrictions.contains(role));
			!required || viewer_roles.contains(role)
		})
	}

	/// Copy of the page without the widgets the viewer may not see
	pub fn restricted_for(&self, viewer_roles: &BTreeSet<String>) -> PageContent {
		let mut page = self.clone();
		page.widgets.retain(|w| w.is_allowed(viewer_roles));
		page
	}

	/// Widgets with a navigation title, in render order
	pub fn navigation_entries(&self) -> Vec<NavigationEntry> {
		self.widgets
			.iter()
			.filter(|w| !w.navigation_title.is_blank())
			.map(|w| NavigationEntry {
				widget_id: w.id.clone(),
				title: w.navigation_title.clone(),
			})
			.collect()
	}

	/// Ids of the widgets, in render order
	pub fn widget_ids(&self) -> Vec<&str> {
		self.widgets.iter().map(|w| w.id.as_str()).collect()
	}
}

impl Restricted for PageContent {
	fn id(&self) -> &str {
		&self.id
	}

	fn restrictions(&self) -> &BTreeSet<String> {
		&self.restrictions
	}
}

impl Translatable for PageMetaData {
	fn translate(&mut self, locale: Option<&str>) {
		self.title.translate(locale);
		self.description.translate(locale);
		self.keywords.translate(locale);
	}
}

impl Translatable for PageContent {
	fn translate(&mut self, locale: Option<&str>) {
		self.meta_data.translate(locale);
		self.widgets.translate(locale);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::widget::{TextWidget, WidgetKind};
	use rstest::{fixture, rstest};
	use serde_json::json;

	fn text(id: &str) -> Widget {
		Widget::new(WidgetKind::Text(TextWidget::default())).with_id(id)
	}

	#[fixture]
	fn page() -> PageContent {
		let mut page = PageContent::new("p1");
		page.widgets = vec![text("a"), text("b"), text("c")];
		page
	}

	#[rstest]
	fn test_move_up_swaps_with_previous(mut page: PageContent) {
		assert!(page.move_widget("b", MoveDirection::Up).unwrap());
		assert_eq!(page.widget_ids(), vec!["b", "a", "c"]);

		assert!(!page.move_widget("b", MoveDirection::Up).unwrap());
		assert_eq!(page.widget_ids(), vec!["b", "a", "c"]);
	}

	#[rstest]
	fn test_move_unknown_widget(mut page: PageContent) {
		let result = page.move_widget("x", MoveDirection::Down);

		assert!(matches!(result, Err(PageError::UnknownWidget(id)) if id == "x"));
	}

	#[rstest]
	#[case(None, 3)]
	#[case(Some(0), 0)]
	#[case(Some(2), 2)]
	fn test_insert_widget(mut page: PageContent, #[case] index: Option<usize>, #[case] expected: usize) {
		let position = page.insert_widget(text("n"), index).unwrap();

		assert_eq!(position, expected);
		assert_eq!(page.widgets[expected].id, "n");
		assert_eq!(page.widgets.len(), 4);
	}

	#[rstest]
	fn test_insert_widget_past_end(mut page: PageContent) {
		let result = page.insert_widget(text("n"), Some(4));

		assert!(matches!(result, Err(PageError::IndexOutOfBounds { index: 4, len: 3 })));
	}

	#[rstest]
	fn test_remove_keeps_order(mut page: PageContent) {
		page.remove_widget("b").unwrap();

		assert_eq!(page.widget_ids(), vec!["a", "c"]);
	}

	#[rstest]
	fn test_compute_editable(mut page: PageContent) {
		page.widgets[1].restrictions.insert(roles::ROLE_ADMIN.to_string());
		let user: BTreeSet<String> = [roles::ROLE_USER.to_string()].into();
		let admin: BTreeSet<String> = [roles::ROLE_ADMIN.to_string()].into();

		assert!(!page.compute_editable(&user));
		assert!(page.compute_editable(&admin));
	}

	#[rstest]
	fn test_restricted_for_hides_widgets(mut page: PageContent) {
		page.widgets[0].restrictions.insert(roles::ROLE_ADMIN.to_string());

		let visible = page.restricted_for(&BTreeSet::new());

		assert_eq!(visible.widget_ids(), vec!["b", "c"]);
	}

	#[rstest]
	fn test_unknown_widget_types_are_skipped() {
		let json = json!({
			"id": "p1",
			"widgets": [
				{ "id": "a", "type": "TEXT", "heading": { "value": "Hi" } },
				{ "id": "b", "type": "CAROUSEL" },
				{ "id": "c" },
				{ "id": "d", "type": "BUTTONS", "columns": 2 }
			],
			"metaData": null
		});

		let page: PageContent = serde_json::from_value(json).unwrap();

		assert_eq!(page.widget_ids(), vec!["a", "d"]);
		assert_eq!(page.meta_data, PageMetaData::default());
	}

	#[rstest]
	fn test_navigation_entries_skip_untitled(mut page: PageContent) {
		page.widgets[2].navigation_title = "Contact".into();

		let entries = page.navigation_entries();

		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].widget_id, "c");
	}
}
