//! Menu export and import with operation progress

use artivact::core::{OperationProgress, ProgressError, ProgressWatcher};
use artivact::menu::ExportConfiguration;
use artivact::menu::exchange::is_menu_export;
use artivact::test::fixtures::{admin_context, museum_backend};
use artivact::test::{BackendCall, MemoryBackend, ScriptedConfirmer};
use artivact_integration_tests::Workspace;
use rstest::*;
use std::time::Duration;

fn watcher() -> ProgressWatcher {
	ProgressWatcher::new(Duration::from_millis(1)).with_timeout(Duration::from_secs(5))
}

fn step(current: i64, target: i64) -> OperationProgress {
	OperationProgress {
		key: "MENU_IMPORT".to_string(),
		current_amount: current,
		target_amount: target,
		error: None,
	}
}

#[rstest]
#[tokio::test]
async fn test_imported_archive_restores_deleted_menu(museum_backend: MemoryBackend) {
	// Arrange
	let admin = Workspace::new(museum_backend, admin_context());
	let mut editor = admin.menu_editor().await.unwrap();
	let archive = editor.export("m1", &ExportConfiguration::default()).await.unwrap();
	editor.delete("m1", &ScriptedConfirmer::accepting()).await.unwrap();
	admin.backend.push_progress(step(1, 2));
	admin.backend.push_progress(step(2, 2));

	// Act
	editor.import(&archive.file_name, archive.bytes).await.unwrap();
	let mut seen = Vec::new();
	let last = watcher()
		.watch(admin.api().as_ref(), |p| seen.push(p.percentage()))
		.await
		.unwrap();

	// Assert
	assert!(is_menu_export(&archive.file_name));
	assert_eq!(seen, vec![50, 100]);
	assert!(last.unwrap().is_finished());
	assert!(editor.find("e1").is_some());
	let page = admin.open_menu_page(&editor, "e1").await.unwrap();
	assert_eq!(page.page_id(), "p1");
}

#[rstest]
#[tokio::test]
async fn test_failed_operation_is_reported(museum_backend: MemoryBackend) {
	// Arrange
	let admin = Workspace::new(museum_backend, admin_context());
	admin.backend.push_progress(step(1, 4));
	admin.backend.push_progress(OperationProgress {
		error: Some("archive is corrupt".to_string()),
		..step(2, 4)
	});

	// Act
	let result = watcher().wait(admin.api().as_ref()).await;

	// Assert
	assert_eq!(
		result,
		Err(ProgressError::OperationFailed {
			key: "MENU_IMPORT".to_string(),
			detail: "archive is corrupt".to_string(),
		})
	);
}

#[rstest]
#[tokio::test]
async fn test_export_is_read_only(museum_backend: MemoryBackend) {
	// Arrange
	let admin = Workspace::new(museum_backend, admin_context());
	let editor = admin.menu_editor().await.unwrap();
	admin.backend.clear_calls();

	// Act
	let config = ExportConfiguration {
		optimize_size: true,
		apply_restrictions: true,
		exclude_items: true,
	};
	editor.export("m2", &config).await.unwrap();

	// Assert
	assert_eq!(admin.backend.calls(), vec![BackendCall::ExportMenu("m2".to_string())]);
	assert_eq!(admin.backend.mutating_calls(), 0);
}
