//! Task repository backed by a document store.

use super::{
    envelope::{AdapterFailure, one_shot, rejected, subscription},
    schema,
};
use crate::planning::{
    domain::{SprintId, Task, TaskDraft, TaskId, TaskPatch},
    ports::{ResultStream, TaskRepository},
};
use crate::store::{
    domain::{CollectionQuery, WriteMode},
    ports::DocumentStore,
};
use std::sync::Arc;

/// Task repository over any [`DocumentStore`].
pub struct DocumentTaskRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for DocumentTaskRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> DocumentTaskRepository<S>
where
    S: DocumentStore + 'static,
{
    /// Creates a repository using the shared store handle.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> TaskRepository for DocumentTaskRepository<S>
where
    S: DocumentStore + 'static,
{
    fn list_tasks(&self, sprint_id: SprintId) -> ResultStream<Vec<Task>> {
        const OPERATION: &str = "list_tasks";
        let collection = match schema::tasks_collection(&sprint_id) {
            Ok(collection) => collection,
            Err(err) => return rejected(OPERATION, err.into()),
        };
        let snapshots = self
            .store
            .watch_collection(CollectionQuery::new(collection));
        subscription(OPERATION, snapshots, move |documents| {
            documents
                .iter()
                .map(|document| {
                    schema::decode_task(document, &sprint_id).map_err(AdapterFailure::from)
                })
                .collect()
        })
    }

    fn create_task(&self, sprint_id: SprintId, draft: TaskDraft) -> ResultStream<TaskId> {
        const OPERATION: &str = "create_task";
        let task_id = draft.assign_id();
        let path = match schema::task_path(&sprint_id, &task_id) {
            Ok(path) => path,
            Err(err) => return rejected(OPERATION, err.into()),
        };
        let store = Arc::clone(&self.store);
        one_shot(OPERATION, async move {
            let task = Task::from_draft(task_id, sprint_id, draft);
            store
                .set(&path, schema::encode_task(&task), WriteMode::Merge)
                .await?;
            Ok::<TaskId, AdapterFailure>(task.id().clone())
        })
    }

    fn update_task(
        &self,
        sprint_id: SprintId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> ResultStream<()> {
        const OPERATION: &str = "update_task";
        let path = match schema::task_path(&sprint_id, &task_id) {
            Ok(path) => path,
            Err(err) => return rejected(OPERATION, err.into()),
        };
        let store = Arc::clone(&self.store);
        one_shot(OPERATION, async move {
            store
                .update(&path, schema::encode_task_patch(&patch))
                .await?;
            Ok::<(), AdapterFailure>(())
        })
    }

    fn delete_task(&self, sprint_id: SprintId, task_id: TaskId) -> ResultStream<()> {
        const OPERATION: &str = "delete_task";
        let path = match schema::task_path(&sprint_id, &task_id) {
            Ok(path) => path,
            Err(err) => return rejected(OPERATION, err.into()),
        };
        let store = Arc::clone(&self.store);
        one_shot(OPERATION, async move {
            store.delete(&path).await?;
            Ok::<(), AdapterFailure>(())
        })
    }
}
