//! Repository ports for sprints and tasks.
//!
//! Every operation returns a stream of [`RemoteResult`] envelopes rather than
//! a plain future: the stream always starts with `Loading`, one-shot writes
//! end after a single terminal envelope, and live subscriptions keep
//! emitting `Success` snapshots until they fail or are dropped.

use crate::planning::domain::{
    RemoteResult, Sprint, SprintId, Task, TaskDraft, TaskId, TaskPatch,
};
use futures::stream::BoxStream;

/// Stream of result envelopes produced by one repository operation.
pub type ResultStream<T> = BoxStream<'static, RemoteResult<T>>;

/// Sprint persistence contract.
pub trait SprintRepository: Send + Sync {
    /// Subscribes to all sprints ordered by identifier.
    ///
    /// Each remote change re-emits the complete list.
    fn list_sprints(&self) -> ResultStream<Vec<Sprint>>;

    /// Writes a sprint with merge semantics.
    ///
    /// The write does not check whether the sprint already exists.
    fn create_sprint(&self, sprint: Sprint) -> ResultStream<()>;

    /// Removes a sprint. Removing a missing sprint succeeds.
    ///
    /// Tasks stored under the sprint are left in place.
    fn delete_sprint(&self, id: SprintId) -> ResultStream<()>;

    /// Subscribes to a single sprint record.
    fn get_sprint_properties(&self, id: SprintId) -> ResultStream<Sprint>;

    /// Writes sprint properties with merge semantics.
    fn update_sprint_properties(&self, id: SprintId, sprint: Sprint) -> ResultStream<()>;
}

/// Task persistence contract.
pub trait TaskRepository: Send + Sync {
    /// Subscribes to all tasks of a sprint.
    ///
    /// Each remote change re-emits the complete list.
    fn list_tasks(&self, sprint_id: SprintId) -> ResultStream<Vec<Task>>;

    /// Writes a new task with merge semantics.
    ///
    /// The success payload is the identifier the task was stored under.
    fn create_task(&self, sprint_id: SprintId, draft: TaskDraft) -> ResultStream<TaskId>;

    /// Overwrites the fields set in `patch` on an existing task.
    fn update_task(
        &self,
        sprint_id: SprintId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> ResultStream<()>;

    /// Removes a task. Removing a missing task succeeds.
    fn delete_task(&self, sprint_id: SprintId, task_id: TaskId) -> ResultStream<()>;
}
