//! Shared world state for sprint planning BDD scenarios.

use std::time::Duration;

use rstest::fixture;
use sprint_planner::{
    app::{AppContext, HomeScreen, SprintScreen},
    config::PlannerConfig,
    planning::domain::RemoteResult,
    store::adapters::memory::InMemoryDocumentStore,
};
use tokio::sync::watch;

/// Upper bound on waiting for a screen to reach an expected state.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(2);

/// Scenario world for sprint planning behaviour tests.
pub struct PlanningWorld {
    pub context: AppContext<InMemoryDocumentStore>,
    pub home: Option<HomeScreen<InMemoryDocumentStore>>,
    pub detail: Option<SprintScreen<InMemoryDocumentStore>>,
    pub last_write: Vec<RemoteResult<()>>,
}

impl PlanningWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let config = PlannerConfig::default();
        Self {
            context: AppContext::in_memory(&config),
            home: None,
            detail: None,
            last_write: Vec::new(),
        }
    }

    /// Returns the open home screen.
    ///
    /// # Errors
    ///
    /// Returns an error when no home screen has been opened.
    pub fn home(&self) -> eyre::Result<&HomeScreen<InMemoryDocumentStore>> {
        self.home
            .as_ref()
            .ok_or_else(|| eyre::eyre!("home screen not open in scenario world"))
    }

    /// Returns the open sprint detail screen.
    ///
    /// # Errors
    ///
    /// Returns an error when no detail screen has been opened.
    pub fn detail(&self) -> eyre::Result<&SprintScreen<InMemoryDocumentStore>> {
        self.detail
            .as_ref()
            .ok_or_else(|| eyre::eyre!("detail screen not open in scenario world"))
    }
}

impl Default for PlanningWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PlanningWorld {
    PlanningWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Blocks until the observed state satisfies `condition`.
///
/// # Errors
///
/// Returns an error when the state is not reached within [`STEP_TIMEOUT`].
pub fn wait_until<S: Clone>(
    mut receiver: watch::Receiver<S>,
    condition: impl FnMut(&S) -> bool,
) -> eyre::Result<S> {
    run_async(async move {
        let state = tokio::time::timeout(STEP_TIMEOUT, receiver.wait_for(condition)).await??;
        Ok(S::clone(&state))
    })
}
