//! View model of the sprint list screen.

use super::{ScreenScope, ScreenState, SlotTicket, StateHolder, ViewStatus, state::drive};
use crate::planning::{
    domain::{Sprint, SprintId},
    ports::{ResultStream, SprintRepository},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// State rendered by the sprint list screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeViewState {
    /// Loading and error flags.
    pub status: ViewStatus,
    /// Latest sprint snapshot, ordered by identifier.
    pub sprints: Vec<Sprint>,
}

impl ScreenState for HomeViewState {
    fn status_mut(&mut self) -> &mut ViewStatus {
        &mut self.status
    }
}

/// Requests refused before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HomeError {
    /// The cached sprint list already holds this identifier.
    #[error("sprint already exists: {0}")]
    SprintAlreadyExists(SprintId),

    /// The cached sprint list does not hold this identifier.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),
}

/// Sprint list screen model.
///
/// Dropping the model cancels its subscription and any unfinished writes.
pub struct HomeViewModel<R>
where
    R: SprintRepository + 'static,
{
    repository: Arc<R>,
    state: Arc<StateHolder<HomeViewState>>,
    scope: ScreenScope,
}

impl<R> HomeViewModel<R>
where
    R: SprintRepository + 'static,
{
    /// Creates a model with empty state. Nothing is followed until
    /// [`Self::load_sprints`] is called.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            state: Arc::new(StateHolder::new(HomeViewState::default())),
            scope: ScreenScope::new(),
        }
    }

    /// Starts following the sprint list, replacing any earlier subscription.
    pub fn load_sprints(&self) {
        let envelopes = self.repository.list_sprints();
        let state = Arc::clone(&self.state);
        self.scope.replace("sprints", |ticket| {
            drive(envelopes, state, ticket, |view: &mut HomeViewState, sprints| {
                view.sprints = sprints;
            })
        });
    }

    /// Returns whether the cached sprint list holds `id`.
    ///
    /// The answer reflects the last snapshot received, not the store.
    #[must_use]
    pub fn exists(&self, id: &SprintId) -> bool {
        self.state
            .read(|state| state.sprints.iter().any(|sprint| sprint.id() == id))
    }

    /// Creates a sprint unless the cached list already holds its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::SprintAlreadyExists`] when the identifier is
    /// cached. Store failures are reported through the view state instead.
    pub fn create_sprint(&self, sprint: Sprint) -> Result<(), HomeError> {
        if self.exists(sprint.id()) {
            return Err(HomeError::SprintAlreadyExists(sprint.id().clone()));
        }
        tracing::debug!(sprint_id = %sprint.id(), "creating sprint");
        let envelopes = self.repository.create_sprint(sprint);
        self.write(envelopes);
        Ok(())
    }

    /// Deletes a sprint that the cached list holds.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::SprintNotFound`] when the identifier is not
    /// cached. Store failures are reported through the view state instead.
    pub fn delete_sprint(&self, id: SprintId) -> Result<(), HomeError> {
        if !self.exists(&id) {
            return Err(HomeError::SprintNotFound(id));
        }
        tracing::debug!(sprint_id = %id, "deleting sprint");
        let envelopes = self.repository.delete_sprint(id);
        self.write(envelopes);
        Ok(())
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> HomeViewState {
        self.state.snapshot()
    }

    /// Returns a receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HomeViewState> {
        self.state.subscribe()
    }

    /// Waits for every write issued so far to finish.
    pub async fn settle(&self) {
        self.scope.settle().await;
    }

    fn write(&self, envelopes: ResultStream<()>) {
        let state = Arc::clone(&self.state);
        self.scope.spawn_write(drive(
            envelopes,
            state,
            SlotTicket::detached(),
            |_: &mut HomeViewState, ()| {},
        ));
    }
}
