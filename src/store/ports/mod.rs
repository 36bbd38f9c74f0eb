//! Port contracts for the remote document store.
//!
//! Ports define infrastructure-agnostic interfaces used by planning adapters.

pub mod document_store;

pub use document_store::{DocumentStore, SnapshotStream, StoreError, StoreResult};

#[cfg(test)]
pub use document_store::MockDocumentStore;
