//! Menus and pages edited together on one backend

use artivact::core::roles;
use artivact::menu::RelocationTarget;
use artivact::pages::widget::WidgetPayloadMut;
use artivact::pages::{EditMode, WidgetType};
use artivact::test::fixtures::{admin_context, anonymous_context, museum_backend};
use artivact::test::{MemoryBackend, ScriptedConfirmer};
use artivact::{MenuEditor, TranslatableString};
use artivact_integration_tests::Workspace;
use rstest::*;

#[rstest]
#[tokio::test]
async fn test_page_of_new_entry_is_edited_and_published(museum_backend: MemoryBackend) {
	// Arrange
	let admin = Workspace::new(museum_backend.clone(), admin_context());
	let visitor = Workspace::new(museum_backend, anonymous_context());
	let mut editor = admin.menu_editor().await.unwrap();
	let entry_id = editor
		.create_entry("m1", "Workshops", None)
		.await
		.unwrap()
		.id
		.clone();

	// Act
	let mut session = admin.open_menu_page(&editor, &entry_id).await.unwrap();
	session.enter_edit().await.unwrap();
	let widget_id = session
		.add_widget(&admin.registry, WidgetType::Text, None)
		.await
		.unwrap()
		.id
		.clone();
	let mut draft = session.begin_widget_edit(&widget_id).unwrap();
	if let WidgetPayloadMut::Text(text) = draft.widget.payload_mut() {
		text.heading = TranslatableString::new("Pottery for beginners");
	}
	session.approve_widget_edit(draft).unwrap();
	let published = session.publish(&ScriptedConfirmer::accepting()).await.unwrap();

	// Assert
	assert!(published);
	assert_eq!(session.mode(), EditMode::View);
	let visitor_editor = visitor.menu_editor().await.unwrap();
	let page = visitor.open_menu_page(&visitor_editor, &entry_id).await.unwrap();
	assert_eq!(page.published().widget_ids(), vec![widget_id.as_str()]);
	assert!(!page.is_editable());
	let html = page.render(&visitor.registry).unwrap();
	assert!(html.contains("Pottery for beginners"));
}

#[rstest]
#[tokio::test]
async fn test_unpublished_changes_stay_hidden_from_visitors(museum_backend: MemoryBackend) {
	// Arrange
	let admin = Workspace::new(museum_backend.clone(), admin_context());
	let visitor = Workspace::new(museum_backend, anonymous_context());
	let mut session = admin.open_page("welcome").await.unwrap();
	session.enter_edit().await.unwrap();

	// Act
	session.add_widget(&admin.registry, WidgetType::InfoBox, Some(0)).await.unwrap();

	// Assert
	let page = visitor.open_page("welcome").await.unwrap();
	assert_eq!(page.published().widget_ids(), vec!["w1", "w2", "w3"]);
	assert_eq!(session.content().widgets.len(), 4);
	assert_eq!(session.content().widgets[0].widget_type(), WidgetType::InfoBox);
}

#[rstest]
#[tokio::test]
async fn test_deleting_a_menu_removes_its_pages(museum_backend: MemoryBackend) {
	// Arrange
	let admin = Workspace::new(museum_backend, admin_context());
	let mut editor = admin.menu_editor().await.unwrap();

	// Act
	let deleted = editor.delete("m1", &ScriptedConfirmer::accepting()).await.unwrap();

	// Assert
	assert!(deleted);
	assert!(admin.open_page("p1").await.is_err());
	assert!(admin.open_page("p3").await.is_err());
	assert!(admin.open_page("p2").await.is_ok());
}

#[rstest]
#[tokio::test]
async fn test_relocated_entry_keeps_its_page(museum_backend: MemoryBackend) {
	// Arrange
	let admin = Workspace::new(museum_backend, admin_context());
	let mut editor = admin.menu_editor().await.unwrap();

	// Act
	editor.relocate("e1", RelocationTarget::Under("m2".to_string())).await.unwrap();

	// Assert
	let reloaded = MenuEditor::load(admin.api()).await.unwrap();
	let about = reloaded.find("m2").unwrap();
	assert_eq!(about.menu_entries.len(), 1);
	assert_eq!(reloaded.page_target("e1"), Some("p1"));
	let page = admin.open_menu_page(&reloaded, "e1").await.unwrap();
	assert_eq!(page.page_id(), "p1");
}

#[rstest]
#[tokio::test]
async fn test_restricted_entry_page_is_editable_by_admins_only(museum_backend: MemoryBackend) {
	// Arrange
	let admin = Workspace::new(museum_backend.clone(), admin_context());
	let mut editor = admin.menu_editor().await.unwrap();
	let mut entry = editor.find("e2").unwrap().clone();
	entry.restrictions.insert(roles::ROLE_ADMIN.to_string());

	// Act
	editor.update(&entry).await.unwrap();

	// Assert
	let visitor = Workspace::new(museum_backend, anonymous_context());
	let visible = visitor.menu_editor().await.unwrap();
	assert!(visible.find("e2").is_none());
	assert!(visible.find("e1").is_some());
	let mut session = admin.open_menu_page(&editor, "e2").await.unwrap();
	assert!(session.enter_edit().await.is_ok());
}

#[rstest]
#[tokio::test]
async fn test_index_page_resolves_alias(museum_backend: MemoryBackend) {
	// Arrange
	let visitor = Workspace::new(museum_backend, anonymous_context().with_locale("de"));

	// Act
	let page = visitor.open_index_page().await.unwrap().unwrap();

	// Assert
	assert_eq!(page.page_id(), "p1");
	assert!(page.render(&visitor.registry).unwrap().contains("Willkommen"));
}

#[tokio::test]
async fn test_external_entry_has_no_page() {
	// Arrange
	let admin = Workspace::new(MemoryBackend::new(), admin_context());
	let mut editor = admin.menu_editor().await.unwrap();
	let menu_id = editor.create_menu("Links").await.unwrap().id.clone();
	let entry_id = editor
		.create_entry(&menu_id, "Museum association", Some("https://example.org".to_string()))
		.await
		.unwrap()
		.id
		.clone();

	// Act
	let result = admin.open_menu_page(&editor, &entry_id).await;

	// Assert
	assert!(result.is_err());
	assert_eq!(admin.backend.page_count(), 0);
}
