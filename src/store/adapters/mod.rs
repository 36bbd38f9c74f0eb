//! Document store implementations.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryDocumentStore`]: Thread-safe in-memory store with live
//!   snapshot subscriptions and fault injection for tests and local runs

pub mod memory;
