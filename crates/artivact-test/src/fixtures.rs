//! rstest fixtures for page and menu tests
//!
//! The museum fixture contains:
//!
//! - `p1` (alias `welcome`): a title, a text and a gallery widget, bound to entry `e1`
//! - `p2`: an empty page bound to the top-level menu `m2`
//! - `p3`: a page with a widget only administrators may see, bound to entry `e2`

use crate::backend::MemoryBackend;
use artivact_core::{SessionContext, roles};
use artivact_i18n::TranslatableString;
use artivact_menu::Menu;
use artivact_pages::widget::{ImageGalleryWidget, PageTitleWidget, TextWidget};
use artivact_pages::{PageContent, Widget, WidgetKind, WidgetRegistry};
use rstest::*;

/// An administrator viewing in the default locale
#[fixture]
pub fn admin_context() -> SessionContext {
	SessionContext::admin("admin")
}

/// A registered user without administrative rights
#[fixture]
pub fn user_context() -> SessionContext {
	SessionContext::authenticated("visitor", [roles::ROLE_USER])
}

/// A visitor who is not logged in
#[fixture]
pub fn anonymous_context() -> SessionContext {
	SessionContext::anonymous()
}

/// Registry with every builtin widget type
#[fixture]
pub fn registry() -> WidgetRegistry {
	WidgetRegistry::with_builtins()
}

/// The index page with three widgets
#[fixture]
pub fn welcome_page() -> PageContent {
	let mut page = PageContent::new("p1");
	page.meta_data.title = TranslatableString::new("Welcome").with_translation("de", "Willkommen");
	page.widgets = vec![
		Widget::new(WidgetKind::PageTitle(PageTitleWidget {
			title: TranslatableString::new("Welcome").with_translation("de", "Willkommen"),
			..Default::default()
		}))
		.with_id("w1"),
		Widget::new(WidgetKind::Text(TextWidget {
			heading: TranslatableString::new("History"),
			content: TranslatableString::new("Founded in 1910."),
		}))
		.with_id("w2"),
		Widget::new(WidgetKind::ImageGallery(ImageGalleryWidget {
			images: vec!["vase.jpg".to_string()],
			fullscreen_allowed: true,
			..Default::default()
		}))
		.with_id("w3"),
	];
	page
}

/// A page containing a widget only administrators may see
#[fixture]
pub fn staff_page() -> PageContent {
	let mut page = PageContent::new("p3");
	let mut notes = Widget::new(WidgetKind::Text(TextWidget {
		heading: TranslatableString::new("Staff notes"),
		..Default::default()
	}))
	.with_id("w10");
	notes.restrictions.insert(roles::ROLE_ADMIN.to_string());
	page.widgets = vec![
		Widget::new(WidgetKind::Text(TextWidget {
			heading: TranslatableString::new("Tools"),
			..Default::default()
		}))
		.with_id("w9"),
		notes,
	];
	page
}

/// The navigation tree of the museum
#[fixture]
pub fn museum_menus() -> Vec<Menu> {
	let mut collection = Menu::new("m1", TranslatableString::new("Collection").with_translation("de", "Sammlung"));
	collection.menu_entries = vec![
		Menu::new("e1", "History").with_parent("m1").with_page("p1"),
		Menu::new("e2", "Tools").with_parent("m1").with_page("p3"),
	];
	vec![collection, Menu::new("m2", "About").with_page("p2")]
}

/// A backend holding the museum pages and menus
#[fixture]
pub fn museum_backend(welcome_page: PageContent, staff_page: PageContent, museum_menus: Vec<Menu>) -> MemoryBackend {
	let backend = MemoryBackend::new();
	backend.add_page(welcome_page, Some("welcome"));
	backend.add_page(PageContent::new("p2"), None);
	backend.add_page(staff_page, None);
	backend.set_index_page("welcome");
	museum_menus
		.into_iter()
		.fold(backend, |backend, menu| backend.with_menu(menu))
}
