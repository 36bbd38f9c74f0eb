//! Editable task form backing the create and edit dialogs.

use super::{FormError, Platform, Points, Task, TaskCode, TaskDraft, TaskPatch, UNASSIGNED};

/// One field edit made in a task dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Task code text changed.
    TaskCode(String),
    /// Summary text changed.
    Summary(String),
    /// Platform picked.
    Platform(Platform),
    /// Story point text changed.
    StoryPoint(String),
    /// Development point text changed.
    DevelopmentPoint(String),
    /// Test point text changed.
    TestPoint(String),
    /// Assignee picked.
    AssignedTo(String),
    /// Notes text changed.
    Notes(String),
}

/// Raw text state of a task dialog.
///
/// Point fields stay as typed text until the form is submitted, so a
/// half-typed value never fails an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    task_code: String,
    summary: String,
    platform: Platform,
    story_point: String,
    development_point: String,
    test_point: String,
    assigned_to: String,
    notes: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            task_code: String::new(),
            summary: String::new(),
            platform: Platform::Unknown,
            story_point: "0".to_owned(),
            development_point: "0".to_owned(),
            test_point: "0".to_owned(),
            assigned_to: UNASSIGNED.to_owned(),
            notes: String::new(),
        }
    }
}

impl TaskForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form pre-filled from an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_code: task
                .task_code()
                .map(ToString::to_string)
                .unwrap_or_default(),
            summary: task.summary().to_owned(),
            platform: task.platform(),
            story_point: task.story_point().to_string(),
            development_point: task.development_point().to_string(),
            test_point: task.test_point().to_string(),
            assigned_to: task.assigned_to().to_owned(),
            notes: task.notes().to_owned(),
        }
    }

    /// Applies one field edit.
    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::TaskCode(value) => self.task_code = value,
            FormAction::Summary(value) => self.summary = value,
            FormAction::Platform(value) => self.platform = value,
            FormAction::StoryPoint(value) => self.story_point = value,
            FormAction::DevelopmentPoint(value) => self.development_point = value,
            FormAction::TestPoint(value) => self.test_point = value,
            FormAction::AssignedTo(value) => self.assigned_to = value,
            FormAction::Notes(value) => self.notes = value,
        }
    }

    /// Returns the current task code text.
    #[must_use]
    pub fn task_code(&self) -> &str {
        &self.task_code
    }

    /// Returns the current summary text.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the selected platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the selected assignee.
    #[must_use]
    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    /// Validates the form into a creation payload.
    ///
    /// A blank task code leaves the draft without one.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when a point field is not a number or the task
    /// code contains `/`.
    pub fn to_draft(&self) -> Result<TaskDraft, FormError> {
        let (story, development, test) = self.parse_points()?;
        let mut draft = TaskDraft::new(self.summary.clone())
            .with_platform(self.platform)
            .with_points(story, development, test)
            .with_assignee(self.assigned_to.clone())
            .with_notes(self.notes.clone());
        if !self.task_code.trim().is_empty() {
            let code = TaskCode::new(self.task_code.clone()).map_err(FormError::TaskCode)?;
            draft = draft.with_task_code(code);
        }
        Ok(draft)
    }

    /// Validates the form into a patch that rewrites every editable field.
    ///
    /// A blank task code keeps the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when a point field is not a number or the task
    /// code contains `/`.
    pub fn to_patch(&self) -> Result<TaskPatch, FormError> {
        let (story, development, test) = self.parse_points()?;
        let mut patch = TaskPatch::new()
            .with_summary(self.summary.clone())
            .with_platform(self.platform)
            .with_story_point(story)
            .with_development_point(development)
            .with_test_point(test)
            .with_assignee(self.assigned_to.clone())
            .with_notes(self.notes.clone());
        if !self.task_code.trim().is_empty() {
            let code = TaskCode::new(self.task_code.clone()).map_err(FormError::TaskCode)?;
            patch = patch.with_task_code(code);
        }
        Ok(patch)
    }

    fn parse_points(&self) -> Result<(Points, Points, Points), FormError> {
        let parse = |field: &'static str, text: &str| {
            Points::parse_free(text).map_err(|source| FormError::Points { field, source })
        };
        Ok((
            parse("story point", &self.story_point)?,
            parse("development point", &self.development_point)?,
            parse("test point", &self.test_point)?,
        ))
    }
}
