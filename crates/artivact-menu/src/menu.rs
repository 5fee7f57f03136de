//! Menu tree model

use crate::error::{MenuError, MenuResult};
use artivact_core::restriction::Restricted;
use artivact_core::serde_util::{has_text, null_default};
use artivact_i18n::{Translatable, TranslatableString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a menu node points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
	/// Bound to an internal page
	Page,
	/// Link to external content
	External,
	/// Pure grouping node
	Group,
}

/// A node of the navigation tree
///
/// Top-level nodes are menus, nested nodes are entries. The title fields are
/// flattened into the node on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
	#[serde(default, deserialize_with = "null_default")]
	pub id: String,
	#[serde(default, deserialize_with = "null_default")]
	pub restrictions: BTreeSet<String>,
	#[serde(flatten)]
	pub title: TranslatableString,
	#[serde(default)]
	pub parent_id: Option<String>,
	#[serde(default, deserialize_with = "null_default")]
	pub menu_entries: Vec<Menu>,
	#[serde(default)]
	pub target_page_id: Option<String>,
	#[serde(default)]
	pub target_page_alias: Option<String>,
	#[serde(default)]
	pub hidden: bool,
	#[serde(default)]
	pub external: Option<String>,
}

impl Menu {
	/// Create a node with a title
	pub fn new(id: impl Into<String>, title: impl Into<TranslatableString>) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			..Default::default()
		}
	}

	/// Set the parent node
	pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
		self.parent_id = Some(parent_id.into());
		self
	}

	/// Bind the node to a page
	pub fn with_page(mut self, page_id: impl Into<String>) -> Self {
		self.target_page_id = Some(page_id.into());
		self
	}

	/// Whether the node is a top-level menu
	pub fn is_top_level(&self) -> bool {
		self.parent_id.is_none()
	}

	/// Classify the node
	pub fn kind(&self) -> MenuKind {
		if has_text(self.target_page_id.as_deref()) {
			MenuKind::Page
		} else if has_text(self.external.as_deref()) {
			MenuKind::External
		} else {
			MenuKind::Group
		}
	}

	/// Check the node before it is sent to the backend
	pub fn validate(&self) -> MenuResult<()> {
		if self.title.value.trim().is_empty() {
			let message = if self.is_top_level() {
				"Menu title required!"
			} else {
				"Sub-Menu title required!"
			};
			return Err(MenuError::Validation(message.to_string()));
		}
		if has_text(self.target_page_id.as_deref()) && has_text(self.external.as_deref()) {
			return Err(MenuError::Validation(
				"Menu entry can not link to a page and external content at once!".to_string(),
			));
		}
		for entry in &self.menu_entries {
			entry.validate()?;
		}
		Ok(())
	}

	/// All nested entries, depth first
	pub fn descendants(&self) -> Vec<&Menu> {
		let mut result = Vec::new();
		for entry in &self.menu_entries {
			result.push(entry);
			result.extend(entry.descendants());
		}
		result
	}

	/// Whether `id` is this node or one of its descendants
	pub fn contains(&self, id: &str) -> bool {
		self.id == id || self.menu_entries.iter().any(|e| e.contains(id))
	}

	/// Ids of the pages bound to this node and its descendants
	pub fn bound_pages(&self) -> Vec<&str> {
		std::iter::once(self)
			.chain(self.descendants())
			.filter_map(|m| m.target_page_id.as_deref())
			.filter(|id| !id.is_empty())
			.collect()
	}

	/// Where navigating to this node leads: alias or page id
	pub fn page_target(&self) -> Option<&str> {
		[self.target_page_alias.as_deref(), self.target_page_id.as_deref()]
			.into_iter()
			.flatten()
			.find(|t| !t.is_empty())
	}

	/// Copy without the entries a viewer with `roles` may not see
	pub fn restricted_for(&self, roles: &BTreeSet<String>) -> Menu {
		let mut menu = self.clone();
		menu.menu_entries = self
			.menu_entries
			.iter()
			.filter(|e| e.is_allowed(roles))
			.map(|e| e.restricted_for(roles))
			.collect();
		menu
	}

	/// Drop backend-resolved and empty translations in the whole subtree
	pub fn cleanup_translations(&mut self) {
		self.title.cleanup_translations();
		for entry in &mut self.menu_entries {
			entry.cleanup_translations();
		}
	}
}

impl Restricted for Menu {
	fn id(&self) -> &str {
		&self.id
	}

	fn restrictions(&self) -> &BTreeSet<String> {
		&self.restrictions
	}
}

impl Translatable for Menu {
	fn translate(&mut self, locale: Option<&str>) {
		self.title.translate(locale);
		self.menu_entries.translate(locale);
	}
}

/// Every node of the forest, depth first
pub fn flatten(menus: &[Menu]) -> Vec<&Menu> {
	let mut result = Vec::new();
	for menu in menus {
		result.push(menu);
		result.extend(menu.descendants());
	}
	result
}

/// The node with `id`
pub fn find<'a>(menus: &'a [Menu], id: &str) -> Option<&'a Menu> {
	flatten(menus).into_iter().find(|m| m.id == id)
}

/// Mutable access to the node with `id`
pub fn find_mut<'a>(menus: &'a mut [Menu], id: &str) -> Option<&'a mut Menu> {
	for menu in menus {
		if menu.id == id {
			return Some(menu);
		}
		if let Some(found) = find_mut(&mut menu.menu_entries, id) {
			return Some(found);
		}
	}
	None
}

/// The parent of the node with `id`, `None` for top-level nodes
pub fn parent_of<'a>(menus: &'a [Menu], id: &str) -> Option<&'a Menu> {
	flatten(menus)
		.into_iter()
		.find(|m| m.menu_entries.iter().any(|e| e.id == id))
}

/// The node bound to the page with `id_or_alias`
pub fn find_by_page<'a>(menus: &'a [Menu], id_or_alias: &str) -> Option<&'a Menu> {
	flatten(menus).into_iter().find(|m| {
		m.target_page_id.as_deref() == Some(id_or_alias)
			|| m.target_page_alias.as_deref() == Some(id_or_alias)
	})
}

/// Restrictions a page inherits from the node it is bound to
pub fn restrictions_for_page(menus: &[Menu], id_or_alias: &str) -> BTreeSet<String> {
	find_by_page(menus, id_or_alias)
		.map(|m| m.restrictions.clone())
		.unwrap_or_default()
}
