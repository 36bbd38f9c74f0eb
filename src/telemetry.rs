//! Tracing subscriber setup.

use tracing_subscriber::{
    EnvFilter,
    util::{SubscriberInitExt, TryInitError},
};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Builds the event filter from `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a formatting subscriber as the global default.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed;
/// the existing one stays in place.
pub fn init_tracing() -> Result<(), TryInitError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .finish()
        .try_init()
}
