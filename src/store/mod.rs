//! Remote document store boundary.
//!
//! The planner never talks to a concrete database directly. Everything it
//! persists goes through the [`ports::DocumentStore`] contract, which models
//! a document database addressed by collection and document keys:
//!
//! - Addressing and document values in [`domain`]
//! - The store contract in [`ports`]
//! - Store implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
