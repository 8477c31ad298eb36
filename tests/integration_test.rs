//! Integration tests for the notebin core
//!
//! These tests verify end-to-end functionality against a file-backed
//! database: the full publish/read/view/delete lifecycle, fraud gating
//! of exports, and view aggregation under a running flush loop.

use notebin::database::{create_pool, Repository};
use notebin::error::AppError;
use notebin::services::{FraudDetector, NotesService, ViewAggregator};
use std::time::Duration;
use tempfile::TempDir;

/// Helper to create a test database with schema
async fn create_test_db() -> (Repository, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let pool = create_pool(&db_path).await.unwrap();
    let repo = Repository::new(pool);

    (repo, temp_dir)
}

#[tokio::test]
async fn test_note_lifecycle() {
    let (repo, _temp) = create_test_db().await;
    let notes = NotesService::new(repo.clone());
    let views = ViewAggregator::new(repo);

    // Publish with no identifier
    let note = notes
        .create_note(None, "hello world".to_string(), "pw".to_string())
        .await
        .unwrap();

    assert!(!note.id.is_empty());
    assert_eq!(note.views, 0);
    assert!(note.edited.is_none());

    // Read it back; views stay at zero until a flush happens
    let fetched = notes.get_note(&note.id).await.unwrap();
    assert_eq!(fetched.text, "hello world");
    assert_eq!(fetched.views, 0);

    // Three views, then one flush cycle
    for _ in 0..3 {
        views.record_view(&note.id).await;
    }
    views.flush().await.unwrap();

    let viewed = notes.get_note(&note.id).await.unwrap();
    assert_eq!(viewed.views, 3);

    // Delete via empty update
    notes
        .update_note(note.id.clone(), "pw".to_string(), String::new())
        .await
        .unwrap();

    let err = notes.get_note(&note.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_edit_marks_note_as_edited() {
    let (repo, _temp) = create_test_db().await;
    let notes = NotesService::new(repo);

    let note = notes
        .create_note(None, "first version".to_string(), "pw".to_string())
        .await
        .unwrap();
    assert!(!note.was_edited());

    let updated = notes
        .update_note(
            note.id.clone(),
            "pw".to_string(),
            "second version".to_string(),
        )
        .await
        .unwrap();

    assert!(updated.was_edited());
    assert_eq!(updated.published, note.published);
    assert!(updated.edited.unwrap() >= note.published);
}

#[tokio::test]
async fn test_wrong_password_leaves_note_untouched() {
    let (repo, _temp) = create_test_db().await;
    let notes = NotesService::new(repo);

    let note = notes
        .create_note(None, "guarded content".to_string(), "secret".to_string())
        .await
        .unwrap();

    let err = notes
        .update_note(note.id.clone(), "guess".to_string(), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let fetched = notes.get_note(&note.id).await.unwrap();
    assert_eq!(fetched.text, "guarded content");
    assert!(fetched.edited.is_none());
}

#[tokio::test]
async fn test_fraud_gate_blocks_export_only() {
    let (repo, _temp) = create_test_db().await;
    let notes = NotesService::new(repo);
    let detector = FraudDetector::new();

    let scam = notes
        .create_note(
            None,
            "Act now: send a gift card code to unlock your reward".to_string(),
            String::new(),
        )
        .await
        .unwrap();
    let clean = notes
        .create_note(None, "a perfectly ordinary note".to_string(), String::new())
        .await
        .unwrap();

    // Both notes are fetchable; the caller decides what to do with the flag
    let scam_fetched = notes.get_note(&scam.id).await.unwrap();
    let clean_fetched = notes.get_note(&clean.id).await.unwrap();

    assert!(detector.is_fraud(&scam_fetched));
    assert!(!detector.is_fraud(&clean_fetched));
}

#[tokio::test]
async fn test_flush_loop_under_load() {
    let (repo, _temp) = create_test_db().await;
    let notes = NotesService::new(repo.clone());
    let views = ViewAggregator::new(repo);

    let note = notes
        .create_note(None, "popular note text".to_string(), String::new())
        .await
        .unwrap();

    let flush_handle = views.spawn_flush_loop(Duration::from_millis(5));

    const TASKS: usize = 4;
    const VIEWS_PER_TASK: usize = 100;

    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let views = views.clone();
        let id = note.id.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..VIEWS_PER_TASK {
                views.record_view(&id).await;
                tokio::task::yield_now().await;
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    // Let the loop drain the remaining increments before stopping it
    tokio::time::sleep(Duration::from_millis(50)).await;
    flush_handle.abort();
    views.flush().await.unwrap();

    let total = notes.get_note(&note.id).await.unwrap().views;
    assert_eq!(total, (TASKS * VIEWS_PER_TASK) as i64);
}

#[tokio::test]
async fn test_flush_after_delete_drops_delta() {
    let (repo, _temp) = create_test_db().await;
    let notes = NotesService::new(repo.clone());
    let views = ViewAggregator::new(repo);

    let note = notes
        .create_note(None, "short lived note".to_string(), "pw".to_string())
        .await
        .unwrap();

    views.record_view(&note.id).await;

    // Note is deleted between the view and the flush; the delta is dropped
    notes
        .update_note(note.id.clone(), "pw".to_string(), String::new())
        .await
        .unwrap();

    views.flush().await.unwrap();

    let err = notes.get_note(&note.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
