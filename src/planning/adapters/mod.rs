//! Repository adapters for sprint planning.
//!
//! # Available Adapters
//!
//! - [`document::DocumentSprintRepository`] and
//!   [`document::DocumentTaskRepository`]: map planning operations onto any
//!   [`DocumentStore`](crate::store::ports::DocumentStore)

pub mod document;
