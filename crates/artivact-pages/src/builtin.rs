//! Builtin widget descriptors

use crate::html::{checkbox, escape, markdown, select, text_input, textarea};
use crate::registry::{RenderContext, WidgetDescriptor, WidgetRegistry};
use crate::widget::{
	AvatarWidget, ButtonConfig, ButtonsWidget, ImageGalleryWidget, InfoBoxType, InfoBoxWidget,
	ItemSearchWidget, PageTitleWidget, TextPosition, TextWidget, Widget, WidgetKind, WidgetType,
};
use artivact_i18n::{LocaleContext, TranslatableString};

pub(crate) const DEFAULT_MAX_RESULTS: u32 = 100;
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 9;
pub(crate) const DEFAULT_BUTTON_COLUMNS: u32 = 3;

pub(crate) fn register_all(registry: &mut WidgetRegistry) {
	registry.register(PageTitleDescriptor);
	registry.register(TextDescriptor);
	registry.register(InfoBoxDescriptor);
	registry.register(ItemSearchDescriptor);
	registry.register(AvatarDescriptor);
	registry.register(ImageGalleryDescriptor);
	registry.register(ButtonsDescriptor);
}

fn heading(locale: &LocaleContext, value: &TranslatableString, tag: &str) -> String {
	let text = locale.resolve(value);
	if text.is_empty() {
		return String::new();
	}
	format!("<{tag}>{}</{tag}>", escape(&text))
}

fn button_links(locale: &LocaleContext, configs: &[ButtonConfig]) -> String {
	configs
		.iter()
		.map(|config| {
			let mut style = String::new();
			if let Some(color) = &config.button_color {
				style.push_str(&format!("background-color:{};", escape(color)));
			}
			if let Some(color) = &config.text_color {
				style.push_str(&format!("color:{};", escape(color)));
			}
			let icon = |name: &Option<String>| {
				name.as_deref()
					.filter(|n| !n.is_empty())
					.map(|n| format!(r#"<i class="icon {}"></i>"#, escape(n)))
					.unwrap_or_default()
			};
			format!(
				r#"<a class="btn" href="{}" style="{}">{}{}{}</a>"#,
				escape(config.target_url.as_deref().unwrap_or("#")),
				style,
				icon(&config.icon_left),
				escape(&locale.resolve(&config.label)),
				icon(&config.icon_right),
			)
		})
		.collect()
}

fn button_editor(configs: &[ButtonConfig]) -> String {
	configs
		.iter()
		.enumerate()
		.map(|(i, config)| {
			let mut html = String::from(r#"<fieldset class="button-config">"#);
			html.push_str(&text_input(
				&format!("buttonConfigs[{i}].label"),
				"Label",
				&config.label.value,
			));
			html.push_str(&text_input(
				&format!("buttonConfigs[{i}].targetUrl"),
				"Target URL",
				config.target_url.as_deref().unwrap_or_default(),
			));
			html.push_str("</fieldset>");
			html
		})
		.collect()
}

struct PageTitleDescriptor;

impl WidgetDescriptor for PageTitleDescriptor {
	fn widget_type(&self) -> WidgetType {
		WidgetType::PageTitle
	}

	fn label(&self) -> &str {
		"Page Title"
	}

	fn description(&self) -> &str {
		"Page title with hero image and heading."
	}

	fn create_default(&self) -> WidgetKind {
		WidgetKind::PageTitle(PageTitleWidget::default())
	}

	fn render(&self, widget: &Widget, ctx: &RenderContext) -> String {
		let WidgetKind::PageTitle(p) = widget.payload() else {
			return String::new();
		};
		let background = p
			.background_image
			.as_deref()
			.map(|image| {
				format!(
					r#" style="background-image:url('{}')""#,
					escape(&ctx.file_url(&widget.id, image))
				)
			})
			.unwrap_or_default();
		format!(
			r#"<header class="page-title"{}>{}{}<div class="buttons">{}</div></header>"#,
			background,
			heading(&ctx.locale, &p.title, "h1"),
			heading(&ctx.locale, &p.subtitle, "h2"),
			button_links(&ctx.locale, &p.button_configs),
		)
	}

	fn render_editor(&self, widget: &Widget) -> String {
		let WidgetKind::PageTitle(p) = widget.payload() else {
			return String::new();
		};
		let mut html = text_input("title", "Title", &p.title.value);
		html.push_str(&text_input("subtitle", "Subtitle", &p.subtitle.value));
		html.push_str(&text_input(
			"backgroundImage",
			"Background image",
			p.background_image.as_deref().unwrap_or_default(),
		));
		html.push_str(&button_editor(&p.button_configs));
		html
	}
}

struct TextDescriptor;

impl WidgetDescriptor for TextDescriptor {
	fn widget_type(&self) -> WidgetType {
		WidgetType::Text
	}

	fn label(&self) -> &str {
		"Text"
	}

	fn description(&self) -> &str {
		"Text block with optional heading. Supports Markdown for text formatting."
	}

	fn create_default(&self) -> WidgetKind {
		WidgetKind::Text(TextWidget::default())
	}

	fn render(&self, widget: &Widget, ctx: &RenderContext) -> String {
		let WidgetKind::Text(p) = widget.payload() else {
			return String::new();
		};
		format!(
			"{}{}",
			heading(&ctx.locale, &p.heading, "h2"),
			markdown(&ctx.locale.resolve(&p.content))
		)
	}

	fn render_editor(&self, widget: &Widget) -> String {
		let WidgetKind::Text(p) = widget.payload() else {
			return String::new();
		};
		let mut html = text_input("heading", "Heading", &p.heading.value);
		html.push_str(&textarea("content", "Content", &p.content.value));
		html
	}
}

struct InfoBoxDescriptor;

impl WidgetDescriptor for InfoBoxDescriptor {
	fn widget_type(&self) -> WidgetType {
		WidgetType::InfoBox
	}

	fn label(&self) -> &str {
		"Info Box"
	}

	fn description(&self) -> &str {
		"A text box with optional heading that can be colored according to their three states: INFO, WARN and ALERT."
	}

	fn create_default(&self) -> WidgetKind {
		WidgetKind::InfoBox(InfoBoxWidget {
			box_type: InfoBoxType::Info,
			..Default::default()
		})
	}

	fn render(&self, widget: &Widget, ctx: &RenderContext) -> String {
		let WidgetKind::InfoBox(p) = widget.payload() else {
			return String::new();
		};
		let outlined = if p.outlined { " info-box--outlined" } else { "" };
		format!(
			r#"<div class="info-box info-box--{}{}">{}{}</div>"#,
			p.box_type.css_class(),
			outlined,
			heading(&ctx.locale, &p.heading, "h3"),
			markdown(&ctx.locale.resolve(&p.content)),
		)
	}

	fn render_editor(&self, widget: &Widget) -> String {
		let WidgetKind::InfoBox(p) = widget.payload() else {
			return String::new();
		};
		let selected = match p.box_type {
			InfoBoxType::Info => "INFO",
			InfoBoxType::Warn => "WARN",
			InfoBoxType::Alert => "ALERT",
		};
		let mut html = text_input("heading", "Heading", &p.heading.value);
		html.push_str(&textarea("content", "Content", &p.content.value));
		html.push_str(&select("boxType", "Type", &["INFO", "WARN", "ALERT"], selected));
		html.push_str(&checkbox("outlined", "Outlined", p.outlined));
		html
	}
}

struct ItemSearchDescriptor;

impl WidgetDescriptor for ItemSearchDescriptor {
	fn widget_type(&self) -> WidgetType {
		WidgetType::ItemSearch
	}

	fn label(&self) -> &str {
		"Item Search"
	}

	fn description(&self) -> &str {
		"Either presents the results of a predefined item search, or lets the user input search parameters and displays the results."
	}

	fn create_default(&self) -> WidgetKind {
		WidgetKind::ItemSearch(ItemSearchWidget {
			max_results: DEFAULT_MAX_RESULTS,
			page_size: DEFAULT_PAGE_SIZE,
			..Default::default()
		})
	}

	fn render(&self, widget: &Widget, ctx: &RenderContext) -> String {
		let WidgetKind::ItemSearch(p) = widget.payload() else {
			return String::new();
		};
		format!(
			r#"<div class="item-search" data-search-term="{}" data-max-results="{}" data-page-size="{}">{}{}</div>"#,
			escape(&p.search_term),
			p.max_results,
			p.page_size,
			heading(&ctx.locale, &p.heading, "h2"),
			markdown(&ctx.locale.resolve(&p.content)),
		)
	}

	fn render_editor(&self, widget: &Widget) -> String {
		let WidgetKind::ItemSearch(p) = widget.payload() else {
			return String::new();
		};
		let mut html = text_input("heading", "Heading", &p.heading.value);
		html.push_str(&textarea("content", "Content", &p.content.value));
		html.push_str(&text_input("searchTerm", "Search term", &p.search_term));
		html.push_str(&text_input("maxResults", "Max Results", &p.max_results.to_string()));
		html.push_str(&text_input("pageSize", "Page size", &p.page_size.to_string()));
		html
	}
}

struct AvatarDescriptor;

impl WidgetDescriptor for AvatarDescriptor {
	fn widget_type(&self) -> WidgetType {
		WidgetType::Avatar
	}

	fn label(&self) -> &str {
		"Avatar"
	}

	fn description(&self) -> &str {
		"A portrait image with optional subtext and description to the right."
	}

	fn create_default(&self) -> WidgetKind {
		WidgetKind::Avatar(AvatarWidget::default())
	}

	fn render(&self, widget: &Widget, ctx: &RenderContext) -> String {
		let WidgetKind::Avatar(p) = widget.payload() else {
			return String::new();
		};
		let image = p
			.avatar_image
			.as_deref()
			.map(|image| {
				format!(
					r#"<img src="{}" alt="" />"#,
					escape(&ctx.file_url(&widget.id, image))
				)
			})
			.unwrap_or_default();
		format!(
			r#"<figure class="avatar">{}<figcaption>{}</figcaption></figure>"#,
			image,
			escape(&ctx.locale.resolve(&p.avatar_subtext)),
		)
	}

	fn render_editor(&self, widget: &Widget) -> String {
		let WidgetKind::Avatar(p) = widget.payload() else {
			return String::new();
		};
		text_input("avatarSubtext", "Subtext", &p.avatar_subtext.value)
	}
}

struct ImageGalleryDescriptor;

impl WidgetDescriptor for ImageGalleryDescriptor {
	fn widget_type(&self) -> WidgetType {
		WidgetType::ImageGallery
	}

	fn label(&self) -> &str {
		"Image Gallery"
	}

	fn description(&self) -> &str {
		"A gallery of images with optional heading and text."
	}

	fn create_default(&self) -> WidgetKind {
		WidgetKind::ImageGallery(ImageGalleryWidget {
			fullscreen_allowed: true,
			text_position: TextPosition::Top,
			..Default::default()
		})
	}

	fn render(&self, widget: &Widget, ctx: &RenderContext) -> String {
		let WidgetKind::ImageGallery(p) = widget.payload() else {
			return String::new();
		};
		let position = match p.text_position {
			TextPosition::Top => "top",
			TextPosition::Left => "left",
			TextPosition::Right => "right",
		};
		let mut classes = format!("image-gallery image-gallery--text-{}", position);
		if p.icon_mode {
			classes.push_str(" image-gallery--icons");
		}
		if p.hide_border {
			classes.push_str(" image-gallery--borderless");
		}
		let images: String = p
			.images
			.iter()
			.map(|image| {
				format!(
					r#"<img src="{}" alt=""{} />"#,
					escape(&ctx.file_url(&widget.id, image)),
					if p.fullscreen_allowed { r#" data-fullscreen="true""# } else { "" }
				)
			})
			.collect();
		format!(
			r#"<div class="{}"><div class="text">{}{}</div><div class="images">{}</div></div>"#,
			classes,
			heading(&ctx.locale, &p.heading, "h2"),
			markdown(&ctx.locale.resolve(&p.content)),
			images,
		)
	}

	fn render_editor(&self, widget: &Widget) -> String {
		let WidgetKind::ImageGallery(p) = widget.payload() else {
			return String::new();
		};
		let selected = match p.text_position {
			TextPosition::Top => "TOP",
			TextPosition::Left => "LEFT",
			TextPosition::Right => "RIGHT",
		};
		let mut html = text_input("heading", "Heading", &p.heading.value);
		html.push_str(&textarea("content", "Content", &p.content.value));
		html.push_str(&select("textPosition", "Text position", &["TOP", "LEFT", "RIGHT"], selected));
		html.push_str(&checkbox("fullscreenAllowed", "Fullscreen allowed", p.fullscreen_allowed));
		html.push_str(&checkbox("iconMode", "Icon mode", p.icon_mode));
		html.push_str(&checkbox("hideBorder", "Hide border", p.hide_border));
		html
	}
}

struct ButtonsDescriptor;

impl WidgetDescriptor for ButtonsDescriptor {
	fn widget_type(&self) -> WidgetType {
		WidgetType::Buttons
	}

	fn label(&self) -> &str {
		"Buttons"
	}

	fn description(&self) -> &str {
		"A grid of configurable link buttons."
	}

	fn create_default(&self) -> WidgetKind {
		WidgetKind::Buttons(ButtonsWidget {
			columns: DEFAULT_BUTTON_COLUMNS,
			button_configs: Vec::new(),
		})
	}

	fn render(&self, widget: &Widget, ctx: &RenderContext) -> String {
		let WidgetKind::Buttons(p) = widget.payload() else {
			return String::new();
		};
		format!(
			r#"<div class="buttons" style="grid-template-columns:repeat({}, 1fr)">{}</div>"#,
			p.columns.max(1),
			button_links(&ctx.locale, &p.button_configs),
		)
	}

	fn render_editor(&self, widget: &Widget) -> String {
		let WidgetKind::Buttons(p) = widget.payload() else {
			return String::new();
		};
		let mut html = text_input("columns", "Columns", &p.columns.to_string());
		html.push_str(&button_editor(&p.button_configs));
		html
	}
}
