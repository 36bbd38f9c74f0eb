//! Thread-safe in-memory document store with live subscriptions.

use crate::store::{
    domain::{CollectionQuery, Document, DocumentPath, Fields, WriteMode},
    ports::{DocumentStore, SnapshotStream, StoreError, StoreResult},
};
use async_trait::async_trait;
use futures::{StreamExt, future, stream};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast::{self, error::RecvError};

/// Capacity of the change feed shared by all subscriptions.
const CHANGE_FEED_CAPACITY: usize = 256;

/// In-memory document store.
///
/// Subscriptions are driven by a broadcast change feed: every write publishes
/// the affected path and each open subscription re-reads its snapshot when
/// the change touches what it watches. A subscription that falls behind the
/// feed re-reads unconditionally, so no change is ever missed.
pub struct InMemoryDocumentStore<C = DefaultClock> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for InMemoryDocumentStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<C> {
    state: RwLock<StoreState>,
    changes: broadcast::Sender<StoreEvent>,
    clock: C,
    project_id: Option<String>,
}

#[derive(Debug, Default)]
struct StoreState {
    documents: BTreeMap<DocumentPath, StoredDocument>,
    pending_write_failure: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    fields: Fields,
    update_time: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
enum StoreEvent {
    Changed(DocumentPath),
    Broken(String),
}

impl InMemoryDocumentStore<DefaultClock> {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemoryDocumentStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryDocumentStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates an empty store stamping writes with the given clock.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self::build(clock, None)
    }

    /// Creates an empty store scoped to a project identifier.
    #[must_use]
    pub fn for_project(project_id: impl Into<String>, clock: C) -> Self {
        Self::build(clock, Some(project_id.into()))
    }

    fn build(clock: C, project_id: Option<String>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(StoreState::default()),
                changes,
                clock,
                project_id,
            }),
        }
    }

    /// Returns the project this store is scoped to, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.inner.project_id.as_deref()
    }

    /// Returns the number of stored documents across all collections.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Internal`] when lock acquisition fails.
    pub fn document_count(&self) -> StoreResult<usize> {
        let state = self.read_state()?;
        Ok(state.documents.len())
    }

    /// Makes the next write fail with [`StoreError::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Internal`] when lock acquisition fails.
    pub fn fail_next_write(&self, message: impl Into<String>) -> StoreResult<()> {
        let mut state = self.write_state()?;
        state.pending_write_failure = Some(message.into());
        Ok(())
    }

    /// Fails every open subscription with [`StoreError::Subscription`].
    ///
    /// Subscriptions opened afterwards are unaffected.
    pub fn break_subscriptions(&self, message: impl Into<String>) {
        self.publish(StoreEvent::Broken(message.into()));
    }

    fn read_state(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.inner
            .state
            .read()
            .map_err(|err| StoreError::internal(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.inner
            .state
            .write()
            .map_err(|err| StoreError::internal(std::io::Error::other(err.to_string())))
    }

    fn publish(&self, event: StoreEvent) {
        if self.inner.changes.send(event).is_err() {
            tracing::trace!("store change published with no open subscriptions");
        }
    }

    /// Applies a write under the state lock, honouring injected failures.
    fn write_with(
        &self,
        path: &DocumentPath,
        apply: impl FnOnce(&mut StoreState) -> StoreResult<bool>,
    ) -> StoreResult<()> {
        let changed = {
            let mut state = self.write_state()?;
            if let Some(message) = state.pending_write_failure.take() {
                return Err(StoreError::Unavailable(message));
            }
            apply(&mut state)?
        };
        if changed {
            self.publish(StoreEvent::Changed(path.clone()));
        }
        Ok(())
    }

    fn collection_snapshot(&self, query: &CollectionQuery) -> StoreResult<Vec<Document>> {
        let state = self.read_state()?;
        let mut documents: Vec<Document> = state
            .documents
            .iter()
            .filter(|(path, _)| path.collection() == query.collection())
            .map(|(path, stored)| {
                Document::new(path.clone(), stored.fields.clone(), stored.update_time)
            })
            .collect();
        query.sort(&mut documents);
        Ok(documents)
    }

    fn document_snapshot(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
        let state = self.read_state()?;
        Ok(state
            .documents
            .get(path)
            .map(|stored| Document::new(path.clone(), stored.fields.clone(), stored.update_time)))
    }

    /// Builds a live stream that re-reads `snapshot` whenever `affects`
    /// accepts a changed path.
    fn live<T, S, A>(&self, snapshot: S, affects: A) -> SnapshotStream<T>
    where
        T: Send + 'static,
        S: Fn(&Self) -> StoreResult<T> + Send + Sync + 'static,
        A: Fn(&DocumentPath) -> bool + Send + Sync + 'static,
    {
        // Subscribe before the first read so no change falls between them.
        let receiver = self.inner.changes.subscribe();
        let initial = snapshot(self);
        let watch = Watch {
            store: self.clone(),
            receiver,
            finished: initial.is_err(),
            snapshot,
            affects,
        };
        let updates = stream::unfold(watch, |mut watch| async move {
            let item = watch.next_snapshot().await?;
            Some((item, watch))
        });
        stream::once(future::ready(initial)).chain(updates).boxed()
    }
}

struct Watch<C, S, A> {
    store: InMemoryDocumentStore<C>,
    receiver: broadcast::Receiver<StoreEvent>,
    finished: bool,
    snapshot: S,
    affects: A,
}

impl<C, T, S, A> Watch<C, S, A>
where
    C: Clock + Send + Sync + 'static,
    S: Fn(&InMemoryDocumentStore<C>) -> StoreResult<T>,
    A: Fn(&DocumentPath) -> bool,
{
    async fn next_snapshot(&mut self) -> Option<StoreResult<T>> {
        if self.finished {
            return None;
        }
        loop {
            match self.receiver.recv().await {
                Ok(StoreEvent::Changed(path)) if (self.affects)(&path) => break,
                Ok(StoreEvent::Changed(_)) => {}
                Ok(StoreEvent::Broken(message)) => {
                    self.finished = true;
                    return Some(Err(StoreError::Subscription(message)));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "subscription lagged behind change feed");
                    break;
                }
                Err(RecvError::Closed) => return None,
            }
        }
        let item = (self.snapshot)(&self.store);
        self.finished = item.is_err();
        Some(item)
    }
}

#[async_trait]
impl<C> DocumentStore for InMemoryDocumentStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn set(&self, path: &DocumentPath, fields: Fields, mode: WriteMode) -> StoreResult<()> {
        let update_time = self.inner.clock.utc();
        self.write_with(path, |state| {
            if mode == WriteMode::Merge
                && let Some(existing) = state.documents.get_mut(path)
            {
                existing.fields.extend(fields);
                existing.update_time = update_time;
                return Ok(true);
            }
            state.documents.insert(
                path.clone(),
                StoredDocument {
                    fields,
                    update_time,
                },
            );
            Ok(true)
        })
    }

    async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        let update_time = self.inner.clock.utc();
        self.write_with(path, |state| {
            let existing = state
                .documents
                .get_mut(path)
                .ok_or_else(|| StoreError::NotFound(path.clone()))?;
            existing.fields.extend(fields);
            existing.update_time = update_time;
            Ok(true)
        })
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        self.write_with(path, |state| Ok(state.documents.remove(path).is_some()))
    }

    fn watch_collection(&self, query: CollectionQuery) -> SnapshotStream<Vec<Document>> {
        let collection = query.collection().clone();
        self.live(
            move |store| store.collection_snapshot(&query),
            move |path| path.collection() == &collection,
        )
    }

    fn watch_document(&self, path: DocumentPath) -> SnapshotStream<Option<Document>> {
        let watched = path.clone();
        self.live(
            move |store| store.document_snapshot(&path),
            move |changed| changed == &watched,
        )
    }
}
