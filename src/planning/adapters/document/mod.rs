//! Document-store-backed repositories.
//!
//! Sprints live in the `Sprints` collection keyed by sprint identifier; each
//! sprint document owns a `Tasks` sub-collection keyed by task identifier.
//! The field mapping between documents and domain records is spelled out in
//! [`schema`].

mod envelope;
pub mod schema;
mod sprint;
mod task;

pub use envelope::AdapterFailure;
pub use sprint::DocumentSprintRepository;
pub use task::DocumentTaskRepository;
