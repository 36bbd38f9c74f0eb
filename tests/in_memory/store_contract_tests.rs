//! Contract tests for [`InMemoryDocumentStore`] through its public port.

use crate::in_memory::helpers::{STEP_TIMEOUT, store};
use futures::StreamExt;
use rstest::rstest;
use serde_json::json;
use sprint_planner::store::{
    adapters::memory::InMemoryDocumentStore,
    domain::{CollectionPath, Fields, WriteMode},
    ports::{DocumentStore, StoreError},
};
use std::sync::Arc;

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().unwrap_or_default()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn document_watch_sees_creation_and_removal(
    store: Arc<InMemoryDocumentStore>,
) -> eyre::Result<()> {
    let path = CollectionPath::root("Sprints")?.doc("101")?;
    let mut snapshots = store.watch_document(path.clone());

    let initial = tokio::time::timeout(STEP_TIMEOUT, snapshots.next()).await?;
    assert!(matches!(initial, Some(Ok(None))));

    store
        .set(&path, fields(json!({ "sprintId": "101" })), WriteMode::Merge)
        .await?;
    let created = tokio::time::timeout(STEP_TIMEOUT, snapshots.next())
        .await?
        .ok_or_else(|| eyre::eyre!("watch ended"))??;
    assert_eq!(
        created.and_then(|document| document.field("sprintId").cloned()),
        Some(json!("101"))
    );

    store.delete(&path).await?;
    let removed = tokio::time::timeout(STEP_TIMEOUT, snapshots.next())
        .await?
        .ok_or_else(|| eyre::eyre!("watch ended"))??;
    assert!(removed.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subcollections_are_separate_from_parents(
    store: Arc<InMemoryDocumentStore>,
) -> eyre::Result<()> {
    let sprint = CollectionPath::root("Sprints")?.doc("101")?;
    let task = sprint.subcollection("Tasks")?.doc("MAPP-1")?;
    store
        .set(&sprint, fields(json!({ "sprintId": "101" })), WriteMode::Merge)
        .await?;
    store
        .set(&task, fields(json!({ "taskId": "MAPP-1" })), WriteMode::Merge)
        .await?;

    store.delete(&sprint).await?;

    let sprint_snapshot = tokio::time::timeout(STEP_TIMEOUT, store.watch_document(sprint).next())
        .await?
        .ok_or_else(|| eyre::eyre!("watch ended"))??;
    let task_snapshot = tokio::time::timeout(STEP_TIMEOUT, store.watch_document(task).next())
        .await?
        .ok_or_else(|| eyre::eyre!("watch ended"))??;
    assert!(sprint_snapshot.is_none());
    assert!(task_snapshot.is_some());
    assert_eq!(store.document_count()?, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_failure_leaves_data_untouched(
    store: Arc<InMemoryDocumentStore>,
) -> eyre::Result<()> {
    let path = CollectionPath::root("Sprints")?.doc("101")?;
    store.fail_next_write("quota exceeded")?;

    let result = store
        .set(&path, fields(json!({ "sprintId": "101" })), WriteMode::Merge)
        .await;

    assert!(matches!(result, Err(StoreError::Unavailable(message)) if message == "quota exceeded"));
    assert_eq!(store.document_count()?, 0);
    Ok(())
}

#[rstest]
fn project_scope_is_reported() {
    let scoped = InMemoryDocumentStore::for_project("planner", mockable::DefaultClock);
    assert_eq!(scoped.project_id(), Some("planner"));
    assert_eq!(InMemoryDocumentStore::new().project_id(), None);
}
