//! Identifier types for the planning domain.
//!
//! Sprint and task identifiers double as document keys, so they share the
//! key rules of the store: non-empty after trimming and free of `/`.

use super::PlanningDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

fn normalize_key(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains('/') {
        return None;
    }
    Some(trimmed.to_owned())
}

/// User-assigned sprint identifier, e.g. `"101"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SprintId(String);

impl SprintId {
    /// Creates a validated sprint identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::InvalidSprintId`] when the value is
    /// empty after trimming or contains `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, PlanningDomainError> {
        let raw = value.into();
        normalize_key(&raw)
            .map(Self)
            .ok_or(PlanningDomainError::InvalidSprintId(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SprintId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SprintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable task code such as `"MAPP-1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCode(String);

impl TaskCode {
    /// Creates a validated task code.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::InvalidTaskCode`] when the value is
    /// empty after trimming or contains `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, PlanningDomainError> {
        let raw = value.into();
        normalize_key(&raw)
            .map(Self)
            .ok_or(PlanningDomainError::InvalidTaskCode(raw))
    }

    /// Returns the code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Document key of a task within its sprint.
///
/// A task created with a code is keyed by that code; otherwise a random UUID
/// is generated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::InvalidTaskId`] when the value is empty
    /// after trimming or contains `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, PlanningDomainError> {
        let raw = value.into();
        normalize_key(&raw)
            .map(Self)
            .ok_or(PlanningDomainError::InvalidTaskId(raw))
    }

    /// Generates a random task identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&TaskCode> for TaskId {
    fn from(code: &TaskCode) -> Self {
        Self(code.0.clone())
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
