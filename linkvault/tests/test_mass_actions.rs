use linkvault::application::error::ApplicationError;
use linkvault::application::{BulkAction, MassActionCoordinator};
use linkvault::domain::bookmark::BookmarkPatch;
use linkvault::util::testing::{init_test_env, InMemoryGateway};
use std::sync::Arc;

fn coordinator_with(ids: &[&str]) -> (Arc<InMemoryGateway>, MassActionCoordinator) {
    let _ = init_test_env();
    let gateway = Arc::new(InMemoryGateway::new());
    let mut coordinator = MassActionCoordinator::new(gateway.clone());
    coordinator.selection_mut().enter_selection_mode();
    coordinator.selection_mut().select_ids(ids.iter().copied());
    (gateway, coordinator)
}

#[test]
fn given_selection_when_exiting_selection_mode_then_selection_cleared() {
    let (_, mut coordinator) = coordinator_with(&["a", "b"]);
    assert_eq!(coordinator.selection().selected_count(), 2);

    coordinator.selection_mut().exit_selection_mode();

    assert!(coordinator.selection().is_empty());
    assert!(!coordinator.selection().is_selection_mode());
}

#[tokio::test]
async fn given_selection_when_moving_then_single_bulk_update_with_folder() {
    let (gateway, mut coordinator) = coordinator_with(&["b2", "b1", "b3"]);

    let affected = coordinator
        .apply(BulkAction::Move("archive-folder".to_string()))
        .await
        .unwrap();

    assert_eq!(affected, 3);
    let updates = gateway.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, vec!["b1", "b2", "b3"]);
    assert_eq!(updates[0].1, BookmarkPatch::folder("archive-folder"));
    assert!(coordinator.selection().is_empty());
}

#[tokio::test]
async fn given_selection_when_tagging_then_one_call_per_bookmark_in_order() {
    let (gateway, mut coordinator) = coordinator_with(&["c", "a", "b"]);

    coordinator
        .apply(BulkAction::Tag("t1".to_string()))
        .await
        .unwrap();

    assert_eq!(
        gateway.tag_calls(),
        vec![
            ("a".to_string(), "t1".to_string()),
            ("b".to_string(), "t1".to_string()),
            ("c".to_string(), "t1".to_string()),
        ]
    );
    assert!(gateway.updates().is_empty());
}

#[tokio::test]
async fn given_backend_failure_when_applying_then_selection_kept() {
    let (gateway, mut coordinator) = coordinator_with(&["a", "b"]);
    gateway.fail_with("backend down");

    let result = coordinator.apply(BulkAction::Delete).await;

    assert!(matches!(result, Err(ApplicationError::Domain(_))));
    assert_eq!(coordinator.selection().selected_ids(), vec!["a", "b"]);

    gateway.recover();
    coordinator.apply(BulkAction::Delete).await.unwrap();
    assert_eq!(gateway.deletes(), vec![vec!["a".to_string(), "b".to_string()]]);
    assert!(coordinator.selection().is_empty());
}

#[tokio::test]
async fn given_empty_selection_when_applying_then_nothing_selected() {
    let (gateway, mut coordinator) = coordinator_with(&[]);

    let result = coordinator.apply(BulkAction::Favorite(true)).await;

    assert!(matches!(result, Err(ApplicationError::NothingSelected)));
    assert!(gateway.updates().is_empty());
}
