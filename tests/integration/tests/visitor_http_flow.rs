//! A visitor browsing a live backend through the HTTP client

use artivact::i18n::LocaleContext;
use artivact::menu::MenuEditor;
use artivact::pages::{EditMode, PageEditSession, PageError, WidgetRegistry};
use artivact::{ArtivactClient, ClientSettings};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::sync::Arc;

async fn museum_server() -> ServerGuard {
	let mut server = Server::new_async().await;
	server
		.mock("GET", "/api/configuration/public/user")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(json!({"authenticated": false, "roles": []}).to_string())
		.create_async()
		.await;
	server
		.mock("GET", "/api/page")
		.with_status(200)
		.with_body("welcome")
		.create_async()
		.await;
	server
		.mock("GET", "/api/page/welcome")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			json!({
				"id": "p1",
				"editable": false,
				"metaData": {"title": {"value": "Welcome", "translatedValue": "Willkommen"}},
				"widgets": [
					{"type": "PAGE_TITLE", "id": "w1", "title": {"value": "Welcome", "translatedValue": "Willkommen"}},
					{"type": "TEXT", "id": "w2", "heading": {"value": "Opening hours"}, "content": {"value": "Daily"}}
				]
			})
			.to_string(),
		)
		.create_async()
		.await;
	server
		.mock("GET", "/api/menu")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			json!([
				{"id": "m1", "value": "Collection", "translatedValue": "Sammlung", "menuEntries": [
					{"id": "e1", "value": "History", "parentId": "m1", "targetPageAlias": "welcome"}
				]}
			])
			.to_string(),
		)
		.create_async()
		.await;
	server
}

fn client_for(server: &ServerGuard) -> Arc<ArtivactClient> {
	let settings = ClientSettings {
		base_url: server.url(),
		..Default::default()
	};
	Arc::new(ArtivactClient::new(&settings).unwrap().with_locale("de"))
}

#[tokio::test]
async fn test_visitor_reads_translated_index_page() {
	// Arrange
	let server = museum_server().await;
	let client = client_for(&server);
	let context = client.session_context().await.unwrap();

	// Act
	let session = PageEditSession::open(client.clone(), "welcome", context).await.unwrap();
	let html = session.render(&WidgetRegistry::with_builtins()).unwrap();

	// Assert
	assert_eq!(session.page_id(), "p1");
	assert_eq!(session.mode(), EditMode::View);
	assert!(!session.is_editable());
	assert!(html.contains("Willkommen"));
	assert!(html.contains("Opening hours"));
}

#[tokio::test]
async fn test_visitor_follows_menu_entry_to_page() {
	// Arrange
	let server = museum_server().await;
	let client = client_for(&server);
	let context = client.session_context().await.unwrap();
	let locale = LocaleContext::from_session(&context);

	// Act
	let editor = MenuEditor::load(client.clone()).await.unwrap();
	let target = editor.page_target("e1").unwrap().to_string();
	let session = PageEditSession::open(client.clone(), &target, context).await.unwrap();

	// Assert
	assert_eq!(locale.resolve(&editor.menus()[0].title), "Sammlung");
	assert_eq!(target, "welcome");
	assert_eq!(session.published().widget_ids(), vec!["w1", "w2"]);
}

#[tokio::test]
async fn test_visitor_can_not_enter_edit_mode() {
	// Arrange
	let mut server = museum_server().await;
	let wip = server
		.mock("GET", Matcher::Regex("^/api/page/.*/wip$".to_string()))
		.expect(0)
		.create_async()
		.await;
	let client = client_for(&server);
	let context = client.session_context().await.unwrap();
	let mut session = PageEditSession::open(client.clone(), "welcome", context).await.unwrap();

	// Act
	let result = session.enter_edit().await;

	// Assert
	assert!(matches!(result, Err(PageError::NotEditable(_))));
	assert_eq!(session.mode(), EditMode::View);
	wip.assert_async().await;
}
