//! Sprint planner: sprints and estimated tasks over a live document store.
//!
//! This crate provides the planner core: a document store port with an
//! in-memory implementation, repositories that report every remote call as
//! a stream of `Loading`/`Success`/`Error` envelopes, screen view models that
//! fold those envelopes into observable state, and the filtered task board
//! with point totals.
//!
//! # Architecture
//!
//! The planner follows hexagonal architecture principles:
//!
//! - **Domain**: Pure planning types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the store and repositories
//! - **Adapters**: Concrete implementations of ports
//! - **Services**: Per-screen view models
//!
//! # Modules
//!
//! - [`store`]: Document store port and in-memory store
//! - [`planning`]: Sprints, tasks, result envelopes, and view models
//! - [`config`]: TOML configuration with environment overrides
//! - [`telemetry`]: Tracing subscriber setup
//! - [`app`]: Explicit wiring of the store into screens

pub mod app;
pub mod config;
pub mod planning;
pub mod store;
pub mod telemetry;
