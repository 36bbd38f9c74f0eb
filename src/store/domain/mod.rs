//! Addressing and value types for the document store.

mod document;
mod path;

pub use document::{CollectionQuery, Document, Fields, OrderBy, OrderDirection, WriteMode};
pub use path::{CollectionPath, DocumentPath, PathError};
