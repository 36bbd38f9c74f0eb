//! Document store port: one-shot writes and live snapshot subscriptions.

use crate::store::domain::{CollectionQuery, Document, DocumentPath, Fields, WriteMode};
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Live stream of snapshots. The stream ends after yielding an error.
pub type SnapshotStream<T> = BoxStream<'static, StoreResult<T>>;

/// Document database contract.
///
/// Writes are independent and last-write-wins; the store offers no
/// transactions. Subscriptions deliver full snapshots in the order the store
/// produces them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes a document, creating it when absent.
    ///
    /// With [`WriteMode::Merge`] only the given fields are overwritten.
    async fn set(&self, path: &DocumentPath, fields: Fields, mode: WriteMode) -> StoreResult<()>;

    /// Overwrites the given fields of an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the document does not exist.
    async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()>;

    /// Removes a document. Deleting a missing document succeeds.
    async fn delete(&self, path: &DocumentPath) -> StoreResult<()>;

    /// Subscribes to every document of a collection.
    ///
    /// The first item is the current snapshot; each later change to the
    /// collection yields a complete new snapshot.
    fn watch_collection(&self, query: CollectionQuery) -> SnapshotStream<Vec<Document>>;

    /// Subscribes to a single document.
    fn watch_document(&self, path: DocumentPath) -> SnapshotStream<Option<Document>>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The addressed document does not exist.
    #[error("document not found: {0}")]
    NotFound(DocumentPath),

    /// The store refused the request (permissions, invalid data).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A live subscription failed.
    #[error("subscription failed: {0}")]
    Subscription(String),

    /// Internal adapter failure.
    #[error("store internal error: {0}")]
    Internal(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps an internal adapter error.
    #[must_use]
    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Arc::new(err))
    }
}
