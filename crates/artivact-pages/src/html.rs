//! HTML helpers shared by the widget viewers and editors

use pulldown_cmark::html::push_html;
use pulldown_cmark::{Event, Options, Parser};

/// Escape text for use in HTML content and attribute values
///
/// # Examples
///
/// ```
/// use artivact_pages::html::escape;
///
/// assert_eq!(escape("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
/// ```
pub fn escape(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	for ch in text.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'"' => result.push_str("&quot;"),
			'\'' => result.push_str("&#x27;"),
			_ => result.push(ch),
		}
	}
	result
}

/// HTML from Markdown text
///
/// Raw HTML in the source is escaped and shown as text.
///
/// # Examples
///
/// ```
/// use artivact_pages::html::markdown;
///
/// assert_eq!(markdown("Some **bold** text"), "<p>Some <strong>bold</strong> text</p>\n");
/// ```
pub fn markdown(text: &str) -> String {
	let mut options = Options::empty();
	options.insert(Options::ENABLE_TABLES);
	options.insert(Options::ENABLE_STRIKETHROUGH);

	let parser = Parser::new_ext(text, options).map(|event| match event {
		Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
		event => event,
	});
	let mut result = String::with_capacity(text.len() * 3 / 2);
	push_html(&mut result, parser);
	result
}

/// A labelled single-line input
pub(crate) fn text_input(name: &str, label: &str, value: &str) -> String {
	format!(
		r#"<div class="form-group">
	<label for="{name}">{label}</label>
	<input type="text" id="{name}" name="{name}" value="{value}" class="form-control" />
</div>
"#,
		name = name,
		label = escape(label),
		value = escape(value),
	)
}

/// A labelled multi-line input
pub(crate) fn textarea(name: &str, label: &str, value: &str) -> String {
	format!(
		r#"<div class="form-group">
	<label for="{name}">{label}</label>
	<textarea id="{name}" name="{name}" class="form-control" rows="6">{value}</textarea>
</div>
"#,
		name = name,
		label = escape(label),
		value = escape(value),
	)
}

/// A labelled checkbox
pub(crate) fn checkbox(name: &str, label: &str, checked: bool) -> String {
	format!(
		r#"<div class="form-check">
	<input type="checkbox" id="{name}" name="{name}" class="form-check-input"{checked} />
	<label for="{name}" class="form-check-label">{label}</label>
</div>
"#,
		name = name,
		label = escape(label),
		checked = if checked { " checked" } else { "" },
	)
}

/// A labelled select box
pub(crate) fn select(name: &str, label: &str, options: &[&str], selected: &str) -> String {
	let options: String = options
		.iter()
		.map(|option| {
			let marker = if *option == selected { " selected" } else { "" };
			format!(r#"<option value="{0}"{1}>{0}</option>"#, escape(option), marker)
		})
		.collect();
	format!(
		r#"<div class="form-group">
	<label for="{name}">{label}</label>
	<select id="{name}" name="{name}" class="form-control">{options}</select>
</div>
"#,
		name = name,
		label = escape(label),
		options = options,
	)
}
