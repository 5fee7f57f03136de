//! Integration test utilities for Artivact
//!
//! [`Workspace`] wires a menu editor and page edit sessions to one shared
//! in-memory backend, the way the editing UI shares one backend connection.

use artivact::core::{ApiError, SessionContext};
use artivact::menu::{MenuEditor, MenuResult};
use artivact::pages::{PageEditSession, PageError, PageResult, WidgetRegistry};
use artivact::test::{MemoryBackend, MemorySession};
use std::sync::Arc;

/// One viewer working on a backend
#[derive(Debug)]
pub struct Workspace {
	/// Shared backend state
	pub backend: MemoryBackend,
	/// The viewer's session
	pub context: SessionContext,
	/// Widget registry used for rendering and creating widgets
	pub registry: WidgetRegistry,
}

impl Workspace {
	/// Workspace of `context` on `backend` with the built-in widgets
	pub fn new(backend: MemoryBackend, context: SessionContext) -> Self {
		artivact::test::logging::init_test_logging();
		Self {
			backend,
			context,
			registry: WidgetRegistry::with_builtins(),
		}
	}

	/// A fresh connection to the backend
	pub fn api(&self) -> Arc<MemorySession> {
		Arc::new(self.backend.session(self.context.clone()))
	}

	/// Load the menu editor
	pub async fn menu_editor(&self) -> MenuResult<MenuEditor> {
		MenuEditor::load(self.api()).await
	}

	/// Open the page with `id_or_alias`
	pub async fn open_page(&self, id_or_alias: &str) -> PageResult<PageEditSession> {
		PageEditSession::open(self.api(), id_or_alias, self.context.clone()).await
	}

	/// Open the page a menu node navigates to
	pub async fn open_menu_page(&self, editor: &MenuEditor, menu_id: &str) -> PageResult<PageEditSession> {
		let Some(page_id) = editor.page_target(menu_id) else {
			return Err(PageError::Api(ApiError::NotFound(format!(
				"menu {} has no page",
				menu_id
			))));
		};
		tracing::debug!(%menu_id, %page_id, "Opening menu page");
		self.open_page(page_id).await
	}

	/// Open the index page, if one is configured
	pub async fn open_index_page(&self) -> PageResult<Option<PageEditSession>> {
		use artivact::pages::api::PageApi;

		match self.api().load_index_page().await? {
			Some(id_or_alias) => self.open_page(&id_or_alias).await.map(Some),
			None => Ok(None),
		}
	}
}
