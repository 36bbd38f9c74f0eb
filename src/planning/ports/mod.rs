//! Port contracts for sprint planning.
//!
//! Ports define infrastructure-agnostic interfaces used by the view models.

pub mod repository;

pub use repository::{ResultStream, SprintRepository, TaskRepository};
