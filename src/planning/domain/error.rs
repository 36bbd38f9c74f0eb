//! Error types for planning domain validation.

use thiserror::Error;

/// Errors returned while constructing planning domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanningDomainError {
    /// The sprint identifier is empty or contains `/`.
    #[error("invalid sprint identifier '{0}'")]
    InvalidSprintId(String),

    /// The task identifier is empty or contains `/`.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),

    /// The task code is empty or contains `/`.
    #[error("invalid task code '{0}'")]
    InvalidTaskCode(String),

    /// The point value is not one of the guided estimation values.
    #[error("{0} is not a guided estimation value")]
    PointsNotGuided(u32),

    /// The point text is not a non-negative integer.
    #[error("invalid point value '{0}', expected a non-negative integer")]
    InvalidPoints(String),
}

/// Errors returned when a task form cannot be turned into a payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// A point field holds text that is not a number.
    #[error("{field}: {source}")]
    Points {
        /// Name of the offending field.
        field: &'static str,
        /// Underlying validation error.
        source: PlanningDomainError,
    },

    /// The task code field is malformed.
    #[error(transparent)]
    TaskCode(PlanningDomainError),
}
