//! Widget registry and editor dispatch
//!
//! The registry maps every [`WidgetType`] to a [`WidgetDescriptor`] which
//! knows the catalog label, the default payload, the viewer and the editor of
//! that type. Custom descriptors replace builtin ones when registered for the
//! same type.

use crate::builtin;
use crate::error::{PageError, PageResult};
use crate::html::escape;
use crate::page::PageContent;
use crate::widget::{Widget, WidgetKind, WidgetType};
use artivact_i18n::LocaleContext;
use std::collections::BTreeMap;

/// Everything a viewer needs besides the widget itself
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
	/// Locale and viewer kind used to resolve texts
	pub locale: LocaleContext,
	/// Whether the work-in-progress copy is rendered
	pub wip: bool,
}

impl RenderContext {
	/// Context for rendering published content
	pub fn new(locale: LocaleContext) -> Self {
		Self { locale, wip: false }
	}

	/// Context for rendering the work-in-progress copy
	pub fn wip(locale: LocaleContext) -> Self {
		Self { locale, wip: true }
	}

	/// URL of a file stored for a widget
	pub fn file_url(&self, widget_id: &str, filename: &str) -> String {
		let mut url = format!("/api/page/widget/{}/{}", widget_id, filename);
		if self.wip {
			url.push_str("/wip");
		}
		url
	}
}

/// Per-type behaviour of a widget
pub trait WidgetDescriptor: Send + Sync {
	/// The type this descriptor handles
	fn widget_type(&self) -> WidgetType;

	/// Human-readable catalog label
	fn label(&self) -> &str;

	/// Catalog description
	fn description(&self) -> &str;

	/// Payload of a freshly added widget
	fn create_default(&self) -> WidgetKind;

	/// Render the widget for viewing
	fn render(&self, widget: &Widget, ctx: &RenderContext) -> String;

	/// Render the editor form of a widget draft
	fn render_editor(&self, widget: &Widget) -> String;
}

/// Entry of the add-widget catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
	pub widget_type: WidgetType,
	pub label: String,
	pub description: String,
}

/// Registry of widget descriptors
pub struct WidgetRegistry {
	descriptors: BTreeMap<WidgetType, Box<dyn WidgetDescriptor>>,
}

impl WidgetRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			descriptors: BTreeMap::new(),
		}
	}

	/// Create a registry holding every builtin widget type
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		builtin::register_all(&mut registry);
		registry
	}

	/// Register a descriptor, replacing any descriptor of the same type
	pub fn register<D: WidgetDescriptor + 'static>(&mut self, descriptor: D) {
		let widget_type = descriptor.widget_type();
		if self.descriptors.insert(widget_type, Box::new(descriptor)).is_some() {
			tracing::debug!(%widget_type, "Replaced widget descriptor");
		}
	}

	/// The descriptor for `widget_type`
	pub fn get(&self, widget_type: WidgetType) -> Option<&dyn WidgetDescriptor> {
		self.descriptors.get(&widget_type).map(|d| d.as_ref())
	}

	fn descriptor(&self, widget_type: WidgetType) -> PageResult<&dyn WidgetDescriptor> {
		self.get(widget_type)
			.ok_or_else(|| PageError::UnknownWidgetType(widget_type.to_string()))
	}

	/// Registered types with label and description, in catalog order
	pub fn catalog(&self) -> Vec<CatalogEntry> {
		self.descriptors
			.values()
			.map(|d| CatalogEntry {
				widget_type: d.widget_type(),
				label: d.label().to_string(),
				description: d.description().to_string(),
			})
			.collect()
	}

	/// Create a widget of `widget_type` with its default payload
	pub fn create_widget(&self, widget_type: WidgetType) -> PageResult<Widget> {
		let kind = self.descriptor(widget_type)?.create_default();
		if kind.widget_type() != widget_type {
			return Err(PageError::PayloadMismatch {
				expected: widget_type,
				actual: kind.widget_type(),
			});
		}
		Ok(Widget::new(kind))
	}

	/// Render a single widget wrapped in its section
	pub fn render_widget(&self, widget: &Widget, ctx: &RenderContext) -> PageResult<String> {
		let descriptor = self.descriptor(widget.widget_type())?;
		Ok(format!(
			r#"<section id="widget-{}" class="artivact-widget artivact-widget--{}">{}</section>"#,
			escape(&widget.id),
			widget.widget_type().as_str().to_lowercase().replace('_', "-"),
			descriptor.render(widget, ctx)
		))
	}

	/// Render all widgets of a page in order
	pub fn render_page(&self, page: &PageContent, ctx: &RenderContext) -> PageResult<String> {
		let mut html = String::new();
		for widget in &page.widgets {
			html.push_str(&self.render_widget(widget, ctx)?);
		}
		Ok(html)
	}

	/// Render the editor form for a widget draft
	pub fn render_editor(&self, widget: &Widget) -> PageResult<String> {
		let descriptor = self.descriptor(widget.widget_type())?;
		Ok(format!(
			r#"<form class="widget-editor" data-widget-id="{}" data-widget-type="{}">
{}</form>"#,
			escape(&widget.id),
			widget.widget_type(),
			descriptor.render_editor(widget)
		))
	}
}

impl Default for WidgetRegistry {
	fn default() -> Self {
		Self::with_builtins()
	}
}

impl std::fmt::Debug for WidgetRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WidgetRegistry")
			.field("types", &self.descriptors.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::widget::{TextWidget, WidgetPayloadMut};
	use rstest::rstest;

	struct PlainText;

	impl WidgetDescriptor for PlainText {
		fn widget_type(&self) -> WidgetType {
			WidgetType::Text
		}

		fn label(&self) -> &str {
			"Plain text"
		}

		fn description(&self) -> &str {
			"Unformatted text"
		}

		fn create_default(&self) -> WidgetKind {
			WidgetKind::Text(TextWidget {
				content: "Lorem ipsum".into(),
				..Default::default()
			})
		}

		fn render(&self, widget: &Widget, ctx: &RenderContext) -> String {
			match widget.payload() {
				WidgetKind::Text(text) => escape(&ctx.locale.resolve(&text.content)),
				_ => String::new(),
			}
		}

		fn render_editor(&self, _widget: &Widget) -> String {
			String::new()
		}
	}

	struct Broken;

	impl WidgetDescriptor for Broken {
		fn widget_type(&self) -> WidgetType {
			WidgetType::Avatar
		}

		fn label(&self) -> &str {
			"Broken"
		}

		fn description(&self) -> &str {
			""
		}

		fn create_default(&self) -> WidgetKind {
			WidgetKind::Text(TextWidget::default())
		}

		fn render(&self, _widget: &Widget, _ctx: &RenderContext) -> String {
			String::new()
		}

		fn render_editor(&self, _widget: &Widget) -> String {
			String::new()
		}
	}

	#[rstest]
	fn test_catalog_lists_builtins_in_order() {
		let registry = WidgetRegistry::with_builtins();

		let types: Vec<WidgetType> = registry.catalog().into_iter().map(|e| e.widget_type).collect();

		assert_eq!(types, WidgetType::ALL.to_vec());
	}

	#[rstest]
	fn test_custom_descriptor_replaces_builtin() {
		let mut registry = WidgetRegistry::with_builtins();
		registry.register(PlainText);

		let mut widget = registry.create_widget(WidgetType::Text).unwrap().with_id("t1");
		if let WidgetPayloadMut::Text(text) = widget.payload_mut() {
			text.content = "<hello>".into();
		}
		let html = registry.render_widget(&widget, &RenderContext::default()).unwrap();

		assert_eq!(registry.catalog().len(), 7);
		assert_eq!(
			html,
			r#"<section id="widget-t1" class="artivact-widget artivact-widget--text">&lt;hello&gt;</section>"#
		);
	}

	#[rstest]
	fn test_unregistered_type() {
		let registry = WidgetRegistry::new();

		let result = registry.create_widget(WidgetType::Buttons);

		assert!(matches!(result, Err(PageError::UnknownWidgetType(t)) if t == "BUTTONS"));
	}

	#[rstest]
	fn test_mismatching_default_payload_is_rejected() {
		let mut registry = WidgetRegistry::new();
		registry.register(Broken);

		let result = registry.create_widget(WidgetType::Avatar);

		assert!(matches!(
			result,
			Err(PageError::PayloadMismatch {
				expected: WidgetType::Avatar,
				actual: WidgetType::Text
			})
		));
	}

	#[rstest]
	#[case(false, "/api/page/widget/w1/a.jpg")]
	#[case(true, "/api/page/widget/w1/a.jpg/wip")]
	fn test_file_url(#[case] wip: bool, #[case] expected: &str) {
		let ctx = RenderContext {
			locale: LocaleContext::anonymous(),
			wip,
		};

		assert_eq!(ctx.file_url("w1", "a.jpg"), expected);
	}
}
