//! Domain model for sprint planning.
//!
//! The planning domain covers sprints, tasks, estimation points, the result
//! envelope used by remote operations, and the derived task board. None of
//! these types know how they are stored.

mod board;
mod envelope;
mod error;
mod form;
mod ids;
mod sprint;
mod task;

pub use board::{
    ALL_LABEL, AssigneeFilter, PlatformFilter, PointTotals, TaskBoard, TaskFilter, project, totals,
};
pub use envelope::RemoteResult;
pub use error::{FormError, PlanningDomainError};
pub use form::{FormAction, TaskForm};
pub use ids::{SprintId, TaskCode, TaskId};
pub use sprint::Sprint;
pub use task::{PersistedTaskData, Platform, Points, Task, TaskDraft, TaskPatch, UNASSIGNED};
