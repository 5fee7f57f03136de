//! Menu editor tests against the in-memory backend

use artivact_core::{ApiError, ConfirmRequest, SessionContext};
use artivact_menu::menu;
use artivact_menu::{ExportConfiguration, Menu, MenuEditor, MenuError, RelocationTarget};
use artivact_pages::PageContent;
use artivact_test::fixtures::{admin_context, anonymous_context, museum_backend};
use artivact_test::{BackendCall, MemoryBackend, ScriptedConfirmer};
use rstest::*;
use std::sync::Arc;

async fn editor(backend: &MemoryBackend, context: SessionContext) -> MenuEditor {
	let editor = MenuEditor::load(Arc::new(backend.session(context))).await.unwrap();
	backend.clear_calls();
	editor
}

fn ids(menus: &[Menu]) -> Vec<&str> {
	menus.iter().map(|m| m.id.as_str()).collect()
}

/// A menu bound to `p0` with two entries bound to `p1` and `p2`
fn exhibition_backend() -> MemoryBackend {
	let mut exhibition = Menu::new("m1", "Exhibition").with_page("p0");
	exhibition.menu_entries = vec![
		Menu::new("e1", "Bronze Age").with_parent("m1").with_page("p1"),
		Menu::new("e2", "Iron Age").with_parent("m1").with_page("p2"),
	];
	MemoryBackend::new()
		.with_page(PageContent::new("p0"))
		.with_page(PageContent::new("p1"))
		.with_page(PageContent::new("p2"))
		.with_page(PageContent::new("p9"))
		.with_menu(exhibition)
		.with_menu(Menu::new("m2", "Contact").with_page("p9"))
}

#[tokio::test]
async fn test_confirmed_delete_removes_nodes_and_pages() {
	// Arrange
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;
	let confirmer = ScriptedConfirmer::accepting();

	// Act
	let deleted = editor.delete("m1", &confirmer).await.unwrap();

	// Assert
	assert!(deleted);
	assert_eq!(ids(editor.menus()), vec!["m2"]);
	for page_id in ["p0", "p1", "p2"] {
		assert!(!backend.has_page(page_id), "{} should be deleted", page_id);
	}
	assert!(backend.has_page("p9"));
	assert_eq!(
		confirmer.prompts(),
		vec![ConfirmRequest::DeleteMenu {
			menu_id: "m1".to_string(),
			title: "Exhibition".to_string(),
			descendant_count: 2,
		}]
	);
}

#[tokio::test]
async fn test_declined_delete_leaves_tree_unchanged() {
	// Arrange
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;
	let before = editor.menus().to_vec();

	// Act
	let deleted = editor.delete("m1", &ScriptedConfirmer::declining()).await.unwrap();

	// Assert
	assert!(!deleted);
	assert_eq!(editor.menus(), before.as_slice());
	assert!(backend.calls().is_empty());
	assert_eq!(backend.page_count(), 4);
}

#[tokio::test]
async fn test_delete_single_entry() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	editor.delete("e1", &ScriptedConfirmer::accepting()).await.unwrap();

	assert_eq!(ids(&editor.find("m1").unwrap().menu_entries), vec!["e2"]);
	assert!(!backend.has_page("p1"));
	assert!(backend.has_page("p0"));
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn test_blank_titles_are_rejected_before_any_call(#[case] title: &str) {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	let menu = editor.create_menu(title).await.map(|m| m.id.clone());
	let entry = editor.create_entry("m1", title, None).await.map(|m| m.id.clone());

	assert!(matches!(menu, Err(MenuError::Validation(_))));
	assert!(matches!(entry, Err(MenuError::Validation(_))));
	assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_create_menu() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	let id = editor.create_menu("Events").await.unwrap().id.clone();

	assert_eq!(ids(editor.menus()), vec!["m1", "m2", id.as_str()]);
	assert!(editor.find(&id).unwrap().is_top_level());
	assert_eq!(backend.mutating_calls(), 1);
}

#[tokio::test]
async fn test_created_entry_gets_a_page() {
	// Arrange
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	// Act
	let entry = editor.create_entry("m1", "Roman Era", None).await.unwrap().clone();

	// Assert
	assert_eq!(entry.parent_id.as_deref(), Some("m1"));
	let page_id = entry.target_page_id.expect("entry bound to a page");
	assert!(backend.has_page(&page_id));
	assert_eq!(editor.find("m1").unwrap().menu_entries.len(), 3);
}

#[tokio::test]
async fn test_external_entry_gets_no_page() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	let entry = editor
		.create_entry("m1", "Shop", Some("https://shop.example.org".to_string()))
		.await
		.unwrap()
		.clone();

	assert!(entry.target_page_id.is_none());
	assert_eq!(backend.page_count(), 4);
}

#[tokio::test]
async fn test_update_entry_is_saved_with_its_menu() {
	// Arrange
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;
	let mut entry = editor.find("e2").unwrap().clone();
	entry.title.value = "Iron Age Finds".to_string();

	// Act
	editor.update(&entry).await.unwrap();

	// Assert
	let stored = backend.menus();
	assert_eq!(ids(&stored), vec!["m1", "m2"]);
	assert_eq!(menu::find(&stored, "e2").unwrap().title.value, "Iron Age Finds");
}

#[tokio::test]
async fn test_move_top_level_menus() {
	// Arrange
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	// Act
	let moved = editor.move_right("m1").await.unwrap();
	let at_end = editor.move_right("m1").await.unwrap();

	// Assert
	assert!(moved);
	assert!(!at_end);
	assert_eq!(ids(editor.menus()), vec!["m2", "m1"]);
	assert_eq!(backend.mutating_calls(), 1);
}

#[tokio::test]
async fn test_move_entries_within_menu() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	assert!(!editor.move_up("e1").await.unwrap());
	assert!(editor.move_up("e2").await.unwrap());

	assert_eq!(ids(&editor.find("m1").unwrap().menu_entries), vec!["e2", "e1"]);
	assert_eq!(ids(&menu::find(&backend.menus(), "m1").unwrap().menu_entries), vec!["e2", "e1"]);
}

#[tokio::test]
async fn test_move_direction_must_match_level() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	assert!(matches!(editor.move_left("e1").await, Err(MenuError::InvalidHierarchy(_))));
	assert!(matches!(editor.move_down("m1").await, Err(MenuError::InvalidHierarchy(_))));
	assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_relocate_entry_to_top_level() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	editor.relocate("e1", RelocationTarget::TopLevel).await.unwrap();

	assert_eq!(ids(editor.menus()), vec!["m1", "m2", "e1"]);
	assert!(editor.find("e1").unwrap().is_top_level());
	assert_eq!(ids(&editor.find("m1").unwrap().menu_entries), vec!["e2"]);
}

#[tokio::test]
async fn test_relocate_menu_under_another() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	editor
		.relocate("m2", RelocationTarget::Under("m1".to_string()))
		.await
		.unwrap();

	assert_eq!(ids(editor.menus()), vec!["m1"]);
	assert_eq!(editor.find("m2").unwrap().parent_id.as_deref(), Some("m1"));
}

#[tokio::test]
async fn test_relocate_into_own_entry_is_rejected() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	let result = editor
		.relocate("m1", RelocationTarget::Under("e1".to_string()))
		.await;

	assert!(matches!(result, Err(MenuError::InvalidHierarchy(_))));
	assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_add_page_to_top_level_menu_only() {
	// Arrange
	let backend = MemoryBackend::new().with_menu(Menu::new("m1", "Visit"));
	let mut editor = editor(&backend, admin_context()).await;

	// Act
	editor.add_page("m1").await.unwrap();

	// Assert
	let page_id = editor.page_target("m1").unwrap().to_string();
	assert!(backend.has_page(&page_id));
	assert_eq!(backend.mutating_calls(), 1);
}

#[tokio::test]
async fn test_add_page_to_entry_is_rejected() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	assert!(matches!(editor.add_page("e1").await, Err(MenuError::InvalidHierarchy(_))));
	assert!(matches!(editor.add_page("nope").await, Err(MenuError::UnknownMenu(_))));
}

#[tokio::test]
async fn test_cover_picture_is_stored_with_its_extension() {
	// Arrange
	let backend = exhibition_backend();
	let editor = editor(&backend, admin_context()).await;

	// Act
	editor
		.set_cover_picture("m1", "Entrance.JPG", b"jpeg bytes".to_vec())
		.await
		.unwrap();

	// Assert
	assert_eq!(
		backend.cover_picture("m1"),
		Some(("cover-picture.jpg".to_string(), b"jpeg bytes".to_vec()))
	);
	assert_eq!(
		backend.calls(),
		vec![BackendCall::UploadCoverPicture {
			menu_id: "m1".to_string(),
			filename: "Entrance.JPG".to_string(),
		}]
	);
}

#[tokio::test]
async fn test_invalid_cover_picture_is_rejected_before_any_call() {
	let backend = exhibition_backend();
	let editor = editor(&backend, admin_context()).await;

	let no_extension = editor.set_cover_picture("m1", "entrance", b"jpeg".to_vec()).await;
	let empty = editor.set_cover_picture("m1", "entrance.jpg", Vec::new()).await;
	let unknown = editor.set_cover_picture("nope", "entrance.jpg", b"jpeg".to_vec()).await;

	assert!(matches!(no_extension, Err(MenuError::Validation(_))));
	assert!(matches!(empty, Err(MenuError::Validation(_))));
	assert!(matches!(unknown, Err(MenuError::UnknownMenu(_))));
	assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_deleted_menu_loses_its_cover_picture() {
	// Arrange
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;
	editor.set_cover_picture("e1", "bronze.png", b"png".to_vec()).await.unwrap();
	editor.set_cover_picture("m2", "contact.png", b"png".to_vec()).await.unwrap();

	// Act
	editor.delete("m1", &ScriptedConfirmer::accepting()).await.unwrap();

	// Assert
	assert!(backend.cover_picture("e1").is_none());
	assert!(backend.cover_picture("m2").is_some());
}

#[tokio::test]
async fn test_export_then_import_restores_deleted_menu() {
	// Arrange
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;
	let export = editor
		.export("m1", &ExportConfiguration::default())
		.await
		.unwrap();
	editor.delete("m1", &ScriptedConfirmer::accepting()).await.unwrap();

	// Act
	editor.import(&export.file_name, export.bytes).await.unwrap();

	// Assert
	assert!(export.file_name.ends_with(".m1.artivact.menu.zip"));
	assert_eq!(ids(editor.menus()), vec!["m2", "m1"]);
	for page_id in ["p0", "p1", "p2"] {
		assert!(backend.has_page(page_id));
	}
}

#[tokio::test]
async fn test_import_of_broken_archive_fails() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;

	let result = editor.import("broken.artivact.menu.zip", b"not an archive".to_vec()).await;

	assert!(matches!(result, Err(MenuError::Api(ApiError::Rejected(_)))));
	assert_eq!(ids(editor.menus()), vec!["m1", "m2"]);
}

#[tokio::test]
async fn test_failed_call_keeps_local_tree() {
	let backend = exhibition_backend();
	let mut editor = editor(&backend, admin_context()).await;
	backend.set_offline(true);

	let result = editor.move_right("m1").await;

	assert!(matches!(result, Err(MenuError::Api(ApiError::Transport(_)))));
	assert_eq!(ids(editor.menus()), vec!["m1", "m2"]);
}

#[rstest]
#[tokio::test]
async fn test_visitors_do_not_see_restricted_menus(museum_backend: MemoryBackend) {
	// Arrange
	let mut staff = Menu::new("m3", "Staff");
	staff.restrictions.insert(artivact_core::roles::ROLE_ADMIN.to_string());
	let backend = museum_backend.with_menu(staff);

	// Act
	let visitor = editor(&backend, anonymous_context()).await;
	let admin = editor(&backend, admin_context()).await;

	// Assert
	assert_eq!(ids(visitor.menus()), vec!["m1", "m2"]);
	assert_eq!(ids(admin.menus()), vec!["m1", "m2", "m3"]);
}

#[rstest]
#[tokio::test]
async fn test_visitors_can_not_change_menus(museum_backend: MemoryBackend) {
	let mut editor = editor(&museum_backend, anonymous_context()).await;

	let result = editor.create_menu("Hijacked").await.map(|m| m.id.clone());

	assert!(matches!(result, Err(MenuError::Api(ApiError::Rejected(_)))));
	assert_eq!(ids(editor.menus()), vec!["m1", "m2"]);
}

#[rstest]
#[tokio::test]
async fn test_menu_titles_are_translated(museum_backend: MemoryBackend) {
	let editor = editor(&museum_backend, SessionContext::anonymous().with_locale("de")).await;

	let collection = editor.find("m1").unwrap();

	assert_eq!(collection.title.translated_value.as_deref(), Some("Sammlung"));
}
