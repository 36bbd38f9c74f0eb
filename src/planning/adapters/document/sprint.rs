//! Sprint repository backed by a document store.

use super::{
    envelope::{AdapterFailure, one_shot, rejected, subscription},
    schema::{self, SchemaError},
};
use crate::planning::{
    domain::{Sprint, SprintId},
    ports::{ResultStream, SprintRepository},
};
use crate::store::{domain::WriteMode, ports::DocumentStore};
use std::sync::Arc;

/// Sprint repository over any [`DocumentStore`].
pub struct DocumentSprintRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for DocumentSprintRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> DocumentSprintRepository<S>
where
    S: DocumentStore + 'static,
{
    /// Creates a repository using the shared store handle.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn merge_sprint(
        &self,
        operation: &'static str,
        id: SprintId,
        sprint: Sprint,
    ) -> ResultStream<()> {
        let path = match schema::sprint_path(&id) {
            Ok(path) => path,
            Err(err) => return rejected(operation, err.into()),
        };
        let store = Arc::clone(&self.store);
        one_shot(operation, async move {
            let fields = schema::encode_sprint(&id, &sprint);
            store.set(&path, fields, WriteMode::Merge).await?;
            Ok::<(), AdapterFailure>(())
        })
    }
}

impl<S> SprintRepository for DocumentSprintRepository<S>
where
    S: DocumentStore + 'static,
{
    fn list_sprints(&self) -> ResultStream<Vec<Sprint>> {
        const OPERATION: &str = "list_sprints";
        let query = match schema::sprints_query() {
            Ok(query) => query,
            Err(err) => return rejected(OPERATION, err.into()),
        };
        subscription(OPERATION, self.store.watch_collection(query), |documents| {
            documents
                .iter()
                .map(|document| schema::decode_sprint(document).map_err(AdapterFailure::from))
                .collect()
        })
    }

    fn create_sprint(&self, sprint: Sprint) -> ResultStream<()> {
        let id = sprint.id().clone();
        self.merge_sprint("create_sprint", id, sprint)
    }

    fn delete_sprint(&self, id: SprintId) -> ResultStream<()> {
        const OPERATION: &str = "delete_sprint";
        let path = match schema::sprint_path(&id) {
            Ok(path) => path,
            Err(err) => return rejected(OPERATION, err.into()),
        };
        let store = Arc::clone(&self.store);
        one_shot(OPERATION, async move {
            store.delete(&path).await?;
            Ok::<(), AdapterFailure>(())
        })
    }

    fn get_sprint_properties(&self, id: SprintId) -> ResultStream<Sprint> {
        const OPERATION: &str = "get_sprint_properties";
        let path = match schema::sprint_path(&id) {
            Ok(path) => path,
            Err(err) => return rejected(OPERATION, err.into()),
        };
        let missing = path.to_string();
        subscription(OPERATION, self.store.watch_document(path), move |snapshot| {
            let document = snapshot.ok_or_else(|| SchemaError::Missing(missing.clone()))?;
            schema::decode_sprint(&document).map_err(AdapterFailure::from)
        })
    }

    fn update_sprint_properties(&self, id: SprintId, sprint: Sprint) -> ResultStream<()> {
        self.merge_sprint("update_sprint_properties", id, sprint)
    }
}
