//! Explicit wiring of the store handle into repositories and screens.

use crate::config::PlannerConfig;
use crate::planning::{
    adapters::document::{DocumentSprintRepository, DocumentTaskRepository},
    domain::SprintId,
    services::{HomeViewModel, SprintViewModel},
};
use crate::store::{adapters::memory::InMemoryDocumentStore, ports::DocumentStore};
use mockable::DefaultClock;
use std::sync::Arc;

/// Sprint list screen over document-backed repositories.
pub type HomeScreen<S> = HomeViewModel<DocumentSprintRepository<S>>;

/// Sprint detail screen over document-backed repositories.
pub type SprintScreen<S> = SprintViewModel<DocumentSprintRepository<S>, DocumentTaskRepository<S>>;

/// Application context owning the shared store handle.
///
/// Every repository and screen built from one context talks to the same
/// store.
pub struct AppContext<S>
where
    S: DocumentStore + 'static,
{
    store: Arc<S>,
    sprints: Arc<DocumentSprintRepository<S>>,
    tasks: Arc<DocumentTaskRepository<S>>,
    roster: Vec<String>,
}

impl<S> AppContext<S>
where
    S: DocumentStore + 'static,
{
    /// Builds the context around an already connected store.
    #[must_use]
    pub fn new(store: Arc<S>, config: &PlannerConfig) -> Self {
        tracing::info!(
            project_id = %config.store.project_id,
            assignees = config.planning.assignees.len(),
            "planner context created"
        );
        Self {
            sprints: Arc::new(DocumentSprintRepository::new(Arc::clone(&store))),
            tasks: Arc::new(DocumentTaskRepository::new(Arc::clone(&store))),
            roster: config.roster(),
            store,
        }
    }

    /// Returns the shared store handle.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the shared sprint repository.
    #[must_use]
    pub fn sprint_repository(&self) -> Arc<DocumentSprintRepository<S>> {
        Arc::clone(&self.sprints)
    }

    /// Returns the shared task repository.
    #[must_use]
    pub fn task_repository(&self) -> Arc<DocumentTaskRepository<S>> {
        Arc::clone(&self.tasks)
    }

    /// Returns the assignee roster, `Unassigned` first.
    #[must_use]
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Opens the sprint list screen, already following the sprint list.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn home_screen(&self) -> HomeScreen<S> {
        let screen = HomeViewModel::new(self.sprint_repository());
        screen.load_sprints();
        screen
    }

    /// Opens the detail screen of one sprint, already following the sprint
    /// record and its tasks.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn sprint_screen(&self, sprint_id: SprintId) -> SprintScreen<S> {
        let screen = SprintViewModel::new(
            sprint_id,
            self.sprint_repository(),
            self.task_repository(),
            self.roster.clone(),
        );
        screen.load_sprint_properties();
        screen.load_tasks();
        screen
    }
}

impl AppContext<InMemoryDocumentStore> {
    /// Builds a context over a fresh in-memory store scoped to the
    /// configured project.
    #[must_use]
    pub fn in_memory(config: &PlannerConfig) -> Self {
        let store = InMemoryDocumentStore::for_project(config.store.project_id.clone(), DefaultClock);
        Self::new(Arc::new(store), config)
    }
}
