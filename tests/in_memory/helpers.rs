//! Shared test helpers for in-memory integration tests.

use futures::{Stream, StreamExt};
use rstest::fixture;
use sprint_planner::{
    planning::{
        adapters::document::{DocumentSprintRepository, DocumentTaskRepository},
        domain::{RemoteResult, SprintId, TaskId},
    },
    store::adapters::memory::InMemoryDocumentStore,
};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on waiting for a live update.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(2);

/// Provides a fresh shared store for each test.
#[fixture]
pub fn store() -> Arc<InMemoryDocumentStore> {
    Arc::new(InMemoryDocumentStore::new())
}

/// Builds a sprint repository over `store`.
pub fn sprints(store: &Arc<InMemoryDocumentStore>) -> DocumentSprintRepository<InMemoryDocumentStore> {
    DocumentSprintRepository::new(Arc::clone(store))
}

/// Builds a task repository over `store`.
pub fn tasks(store: &Arc<InMemoryDocumentStore>) -> DocumentTaskRepository<InMemoryDocumentStore> {
    DocumentTaskRepository::new(Arc::clone(store))
}

/// Parses a sprint identifier.
///
/// # Errors
///
/// Returns an error when the identifier is invalid.
pub fn sprint_id(raw: &str) -> eyre::Result<SprintId> {
    Ok(SprintId::new(raw)?)
}

/// Parses a task identifier.
///
/// # Errors
///
/// Returns an error when the identifier is invalid.
pub fn task_id(raw: &str) -> eyre::Result<TaskId> {
    Ok(TaskId::new(raw)?)
}

/// Collects every envelope of a finite stream.
///
/// # Errors
///
/// Returns an error when the stream does not finish in time.
pub async fn collect_all<T>(
    stream: impl Stream<Item = RemoteResult<T>>,
) -> eyre::Result<Vec<RemoteResult<T>>> {
    Ok(tokio::time::timeout(STEP_TIMEOUT, stream.collect()).await?)
}

/// Takes the next envelope of a live stream.
///
/// # Errors
///
/// Returns an error when no envelope arrives in time or the stream ended.
pub async fn next_envelope<T, S>(stream: &mut S) -> eyre::Result<RemoteResult<T>>
where
    S: Stream<Item = RemoteResult<T>> + Unpin,
{
    tokio::time::timeout(STEP_TIMEOUT, stream.next())
        .await?
        .ok_or_else(|| eyre::eyre!("stream ended"))
}
