//! View model of the sprint detail screen.

use super::{ScreenScope, ScreenState, SlotTicket, StateHolder, ViewStatus, state::drive};
use crate::planning::{
    domain::{
        AssigneeFilter, FormAction, FormError, PlatformFilter, Sprint, SprintId, Task, TaskBoard,
        TaskDraft, TaskFilter, TaskForm, TaskId, TaskPatch,
    },
    ports::{ResultStream, SprintRepository, TaskRepository},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// State rendered by the sprint detail screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SprintViewState {
    /// Loading and error flags.
    pub status: ViewStatus,
    /// Latest task snapshot, unfiltered.
    pub tasks: Vec<Task>,
    /// Latest sprint record, once received.
    pub sprint: Option<Sprint>,
    /// Active filter selection.
    pub filter: TaskFilter,
    /// Filtered tasks and totals derived from `tasks` and `filter`.
    pub board: TaskBoard,
    /// Task dialog contents.
    pub form: TaskForm,
    /// Task being edited by the dialog, or `None` when creating.
    pub editing: Option<TaskId>,
}

impl SprintViewState {
    fn rebuild_board(&mut self) {
        self.board = TaskBoard::build(&self.tasks, &self.filter);
    }
}

impl ScreenState for SprintViewState {
    fn status_mut(&mut self) -> &mut ViewStatus {
        &mut self.status
    }
}

/// Requests refused before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SprintError {
    /// The cached task list already holds this identifier.
    #[error("task already exists: {0}")]
    TaskAlreadyExists(TaskId),

    /// The task dialog holds invalid input.
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Sprint detail screen model.
///
/// Dropping the model cancels its subscriptions and any unfinished writes.
pub struct SprintViewModel<S, T>
where
    S: SprintRepository + 'static,
    T: TaskRepository + 'static,
{
    sprint_id: SprintId,
    sprints: Arc<S>,
    tasks: Arc<T>,
    roster: Vec<String>,
    state: Arc<StateHolder<SprintViewState>>,
    scope: ScreenScope,
}

impl<S, T> SprintViewModel<S, T>
where
    S: SprintRepository + 'static,
    T: TaskRepository + 'static,
{
    /// Creates a model for one sprint.
    ///
    /// `roster` lists the assignees offered by the assignee filter. Nothing is
    /// followed until [`Self::load_tasks`] or [`Self::load_sprint_properties`]
    /// is called.
    #[must_use]
    pub fn new(sprint_id: SprintId, sprints: Arc<S>, tasks: Arc<T>, roster: Vec<String>) -> Self {
        Self {
            sprint_id,
            sprints,
            tasks,
            roster,
            state: Arc::new(StateHolder::new(SprintViewState::default())),
            scope: ScreenScope::new(),
        }
    }

    /// Returns the sprint this screen shows.
    #[must_use]
    pub const fn sprint_id(&self) -> &SprintId {
        &self.sprint_id
    }

    /// Starts following the sprint's tasks.
    pub fn load_tasks(&self) {
        let envelopes = self.tasks.list_tasks(self.sprint_id.clone());
        let state = Arc::clone(&self.state);
        self.scope.replace("tasks", |ticket| {
            drive(envelopes, state, ticket, |view: &mut SprintViewState, tasks| {
                view.tasks = tasks;
                view.rebuild_board();
            })
        });
    }

    /// Starts following the sprint record.
    pub fn load_sprint_properties(&self) {
        let envelopes = self.sprints.get_sprint_properties(self.sprint_id.clone());
        let state = Arc::clone(&self.state);
        self.scope.replace("sprint", |ticket| {
            drive(envelopes, state, ticket, |view: &mut SprintViewState, sprint| {
                view.sprint = Some(sprint);
            })
        });
    }

    /// Creates a task in this sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintError::TaskAlreadyExists`] when the draft's task code
    /// is already cached. Store failures are reported through the view state.
    pub fn create_task(&self, draft: TaskDraft) -> Result<(), SprintError> {
        if let Some(code) = draft.task_code() {
            let id = TaskId::from(code);
            if self.task_exists(&id) {
                return Err(SprintError::TaskAlreadyExists(id));
            }
        }
        let envelopes = self.tasks.create_task(self.sprint_id.clone(), draft);
        let state = Arc::clone(&self.state);
        self.scope.spawn_write(drive(
            envelopes,
            state,
            SlotTicket::detached(),
            |_: &mut SprintViewState, task_id: TaskId| {
                tracing::debug!(task_id = %task_id, "task created");
            },
        ));
        Ok(())
    }

    /// Overwrites the fields set in `patch` on a task.
    pub fn update_task(&self, task_id: TaskId, patch: TaskPatch) {
        let envelopes = self
            .tasks
            .update_task(self.sprint_id.clone(), task_id, patch);
        self.write(envelopes);
    }

    /// Removes a task.
    pub fn delete_task(&self, task_id: TaskId) {
        let envelopes = self.tasks.delete_task(self.sprint_id.clone(), task_id);
        self.write(envelopes);
    }

    /// Replaces the sprint notes, keeping the other sprint fields.
    pub fn update_sprint_notes(&self, notes: impl Into<String>) {
        let sprint = Sprint::new(self.sprint_id.clone()).with_notes(notes);
        self.update_sprint_properties(sprint);
    }

    /// Writes the set fields of `sprint` onto this sprint's record.
    pub fn update_sprint_properties(&self, sprint: Sprint) {
        let envelopes = self
            .sprints
            .update_sprint_properties(self.sprint_id.clone(), sprint);
        self.write(envelopes);
    }

    /// Selects the platform filter.
    pub fn set_platform_filter(&self, platform: PlatformFilter) {
        self.state.update(|state| {
            state.filter.platform = platform;
            state.rebuild_board();
        });
    }

    /// Selects the assignee filter.
    pub fn set_assignee_filter(&self, assignee: AssigneeFilter) {
        self.state.update(|state| {
            state.filter.assignee = assignee;
            state.rebuild_board();
        });
    }

    /// Returns the assignee filter choices for the configured roster.
    #[must_use]
    pub fn assignee_options(&self) -> Vec<AssigneeFilter> {
        AssigneeFilter::options(&self.roster)
    }

    /// Returns whether the cached task list holds `id`.
    #[must_use]
    pub fn task_exists(&self, id: &TaskId) -> bool {
        self.state
            .read(|state| state.tasks.iter().any(|task| task.id() == id))
    }

    /// Opens the task dialog, empty or pre-filled from a cached task.
    ///
    /// Opening for a task that is not cached falls back to an empty dialog.
    pub fn open_form(&self, task_id: Option<&TaskId>) {
        self.state.update(|state| {
            let found = task_id.and_then(|id| state.tasks.iter().find(|task| task.id() == id));
            state.form = found.map_or_else(TaskForm::new, TaskForm::from_task);
            state.editing = found.map(|task| task.id().clone());
        });
    }

    /// Applies one edit to the task dialog.
    pub fn edit_form(&self, action: FormAction) {
        self.state.update(|state| state.form.apply(action));
    }

    /// Submits the task dialog as a create or an update.
    ///
    /// The dialog is reset once the request has been issued.
    ///
    /// # Errors
    ///
    /// Returns [`SprintError::Form`] when the dialog holds invalid input and
    /// [`SprintError::TaskAlreadyExists`] when creating a duplicate code.
    pub fn submit_form(&self) -> Result<(), SprintError> {
        let (form, editing) = self
            .state
            .read(|state| (state.form.clone(), state.editing.clone()));
        match editing {
            Some(task_id) => self.update_task(task_id, form.to_patch()?),
            None => self.create_task(form.to_draft()?)?,
        }
        self.state.update(|state| {
            state.form = TaskForm::new();
            state.editing = None;
        });
        Ok(())
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> SprintViewState {
        self.state.snapshot()
    }

    /// Returns a receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SprintViewState> {
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
            |_: &mut SprintViewState, ()| {},
        ));
    }
}
