//! In-memory document store adapter.

mod store;

pub use store::InMemoryDocumentStore;
