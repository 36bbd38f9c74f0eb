//! Sprint and task planning.
//!
//! This module implements the planner core: sprints and their tasks stored in
//! a remote document database, the three-state result envelope that every
//! remote operation reports through, the per-screen view models that fold
//! those envelopes into observable state, and the filtered task board with
//! point totals. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - View models in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
