//! Collection and document addressing.

use std::fmt;
use thiserror::Error;

/// Errors returned while building store paths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// A path segment is empty after trimming.
    #[error("path segment must not be empty")]
    EmptySegment,

    /// A path segment contains the `/` separator.
    #[error("path segment '{0}' must not contain '/'")]
    SeparatorInSegment(String),
}

fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment.trim().is_empty() {
        return Err(PathError::EmptySegment);
    }
    if segment.contains('/') {
        return Err(PathError::SeparatorInSegment(segment.to_owned()));
    }
    Ok(())
}

/// Slash-separated path of a collection, e.g. `Sprints/101/Tasks`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Creates a top-level collection path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the name is empty or contains `/`.
    pub fn root(name: &str) -> Result<Self, PathError> {
        validate_segment(name)?;
        Ok(Self(name.to_owned()))
    }

    /// Addresses a document inside this collection.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the key is empty or contains `/`.
    pub fn doc(&self, key: &str) -> Result<DocumentPath, PathError> {
        validate_segment(key)?;
        Ok(DocumentPath {
            collection: self.clone(),
            key: key.to_owned(),
        })
    }

    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path of a single document: its parent collection plus the document key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentPath {
    collection: CollectionPath,
    key: String,
}

impl DocumentPath {
    /// Returns the parent collection.
    #[must_use]
    pub const fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Returns the document key within its collection.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Addresses a sub-collection nested under this document.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the name is empty or contains `/`.
    pub fn subcollection(&self, name: &str) -> Result<CollectionPath, PathError> {
        validate_segment(name)?;
        Ok(CollectionPath(format!("{self}/{name}")))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.key)
    }
}
