//! Task record, estimation points, and write payloads.

use super::{PlanningDomainError, SprintId, TaskCode, TaskId};
use std::fmt;

/// Assignee recorded when nobody has picked the task up.
pub const UNASSIGNED: &str = "Unassigned";

/// Platform a task targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    /// Android client work.
    Android,
    /// iOS client work.
    Ios,
    /// Test and QA work.
    Test,
    /// Platform not recorded or not recognised.
    #[default]
    Unknown,
}

impl Platform {
    /// Platforms offered when creating or editing a task.
    pub const SELECTABLE: [Self; 3] = [Self::Android, Self::Ios, Self::Test];

    /// Returns the stored label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Test => "Test",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses a stored label. Unrecognised labels map to [`Self::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Android" => Self::Android,
            "iOS" => Self::Ios,
            "Test" => Self::Test,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimation points for one of the story, development, or test axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Points(u32);

impl Points {
    /// Zero points, used when no estimate is recorded.
    pub const ZERO: Self = Self(0);

    /// Values offered by the guided estimation picker.
    pub const GUIDED: [u32; 8] = [1, 2, 3, 5, 8, 13, 21, 34];

    /// Creates points from any value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates points restricted to the guided estimation values.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::PointsNotGuided`] for values outside
    /// [`Self::GUIDED`].
    pub fn guided(value: u32) -> Result<Self, PlanningDomainError> {
        if Self::GUIDED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(PlanningDomainError::PointsNotGuided(value))
        }
    }

    /// Parses free-text points. Blank text counts as zero.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::InvalidPoints`] when the text is not a
    /// non-negative integer.
    pub fn parse_free(text: &str) -> Result<Self, PlanningDomainError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        trimmed
            .parse::<u32>()
            .map(Self)
            .map_err(|_| PlanningDomainError::InvalidPoints(text.to_owned()))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of work belonging to one sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    task_code: Option<TaskCode>,
    sprint_id: SprintId,
    summary: String,
    platform: Platform,
    story_point: Points,
    development_point: Points,
    test_point: Points,
    assigned_to: String,
    notes: String,
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored task identifier.
    pub id: TaskId,
    /// Stored task code, if any.
    pub task_code: Option<TaskCode>,
    /// Owning sprint.
    pub sprint_id: SprintId,
    /// Short description.
    pub summary: String,
    /// Target platform.
    pub platform: Platform,
    /// Story points.
    pub story_point: Points,
    /// Development points.
    pub development_point: Points,
    /// Test points.
    pub test_point: Points,
    /// Assignee name.
    pub assigned_to: String,
    /// Free-text notes.
    pub notes: String,
}

impl Task {
    /// Creates a task from a draft once its identifier has been assigned.
    #[must_use]
    pub fn from_draft(id: TaskId, sprint_id: SprintId, draft: TaskDraft) -> Self {
        Self {
            id,
            task_code: draft.task_code,
            sprint_id,
            summary: draft.summary,
            platform: draft.platform,
            story_point: draft.story_point,
            development_point: draft.development_point,
            test_point: draft.test_point,
            assigned_to: draft.assigned_to,
            notes: draft.notes,
        }
    }

    /// Reconstructs a task from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            task_code: data.task_code,
            sprint_id: data.sprint_id,
            summary: data.summary,
            platform: data.platform,
            story_point: data.story_point,
            development_point: data.development_point,
            test_point: data.test_point,
            assigned_to: data.assigned_to,
            notes: data.notes,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task code, if any.
    #[must_use]
    pub const fn task_code(&self) -> Option<&TaskCode> {
        self.task_code.as_ref()
    }

    /// Returns the owning sprint.
    #[must_use]
    pub const fn sprint_id(&self) -> &SprintId {
        &self.sprint_id
    }

    /// Returns the summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the target platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the story points.
    #[must_use]
    pub const fn story_point(&self) -> Points {
        self.story_point
    }

    /// Returns the development points.
    #[must_use]
    pub const fn development_point(&self) -> Points {
        self.development_point
    }

    /// Returns the test points.
    #[must_use]
    pub const fn test_point(&self) -> Points {
        self.test_point
    }

    /// Returns the assignee.
    #[must_use]
    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    /// Returns the notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    task_code: Option<TaskCode>,
    summary: String,
    platform: Platform,
    story_point: Points,
    development_point: Points,
    test_point: Points,
    assigned_to: String,
    notes: String,
}

impl TaskDraft {
    /// Creates an unassigned draft with zero points on an unknown platform.
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            task_code: None,
            summary: summary.into(),
            platform: Platform::Unknown,
            story_point: Points::ZERO,
            development_point: Points::ZERO,
            test_point: Points::ZERO,
            assigned_to: UNASSIGNED.to_owned(),
            notes: String::new(),
        }
    }

    /// Sets the task code, which also becomes the task identifier.
    #[must_use]
    pub fn with_task_code(mut self, task_code: TaskCode) -> Self {
        self.task_code = Some(task_code);
        self
    }

    /// Sets the target platform.
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Sets story, development, and test points.
    #[must_use]
    pub const fn with_points(mut self, story: Points, development: Points, test: Points) -> Self {
        self.story_point = story;
        self.development_point = development;
        self.test_point = test;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = assigned_to.into();
        self
    }

    /// Sets free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns the task code, if any.
    #[must_use]
    pub const fn task_code(&self) -> Option<&TaskCode> {
        self.task_code.as_ref()
    }

    /// Returns the identifier a task created from this draft receives.
    ///
    /// Drafts with a code are keyed by it; others get a fresh random key.
    #[must_use]
    pub fn assign_id(&self) -> TaskId {
        self.task_code
            .as_ref()
            .map_or_else(TaskId::generate, TaskId::from)
    }
}

/// Partial task update. Only fields that are set are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New task code. The task identifier never changes.
    pub task_code: Option<TaskCode>,
    /// New summary.
    pub summary: Option<String>,
    /// New platform.
    pub platform: Option<Platform>,
    /// New story points.
    pub story_point: Option<Points>,
    /// New development points.
    pub development_point: Option<Points>,
    /// New test points.
    pub test_point: Option<Points>,
    /// New assignee.
    pub assigned_to: Option<String>,
    /// New notes.
    pub notes: Option<String>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task code.
    #[must_use]
    pub fn with_task_code(mut self, task_code: TaskCode) -> Self {
        self.task_code = Some(task_code);
        self
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the platform.
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the story points.
    #[must_use]
    pub const fn with_story_point(mut self, points: Points) -> Self {
        self.story_point = Some(points);
        self
    }

    /// Sets the development points.
    #[must_use]
    pub const fn with_development_point(mut self, points: Points) -> Self {
        self.development_point = Some(points);
        self
    }

    /// Sets the test points.
    #[must_use]
    pub const fn with_test_point(mut self, points: Points) -> Self {
        self.test_point = Some(points);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
