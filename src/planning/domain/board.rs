//! Derived task board: platform and assignee filtering plus point totals.
//!
//! Everything here is a pure function of the task list and the filter
//! selection. The board is rebuilt from scratch whenever either changes.

use super::{Platform, Task};
use std::fmt;

/// Label of the "no filtering" choice in both filter pickers.
pub const ALL_LABEL: &str = "All";

/// Platform selection of the task board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlatformFilter {
    /// Show tasks for every platform.
    #[default]
    All,
    /// Show only tasks for one platform.
    Only(Platform),
}

impl PlatformFilter {
    /// Returns the choices offered by the platform picker, `All` first.
    #[must_use]
    pub fn options() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(Platform::SELECTABLE.into_iter().map(Self::Only))
            .collect()
    }

    /// Returns `true` when a task on `platform` passes the filter.
    #[must_use]
    pub fn matches(self, platform: Platform) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == platform,
        }
    }

    /// Returns the picker label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => ALL_LABEL,
            Self::Only(platform) => platform.as_str(),
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Assignee selection of the task board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AssigneeFilter {
    /// Show tasks for every assignee.
    #[default]
    All,
    /// Show only tasks assigned to one person.
    Only(String),
}

impl AssigneeFilter {
    /// Interprets a picker label; [`ALL_LABEL`] selects everyone.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == ALL_LABEL {
            Self::All
        } else {
            Self::Only(label.to_owned())
        }
    }

    /// Returns the choices offered by the assignee picker, `All` first.
    #[must_use]
    pub fn options(roster: &[String]) -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(roster.iter().cloned().map(Self::Only))
            .collect()
    }

    /// Returns `true` when a task assigned to `assignee` passes the filter.
    #[must_use]
    pub fn matches(&self, assignee: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == assignee,
        }
    }

    /// Returns the picker label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_LABEL,
            Self::Only(assignee) => assignee,
        }
    }
}

/// Combined filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    /// Platform selection.
    pub platform: PlatformFilter,
    /// Assignee selection.
    pub assignee: AssigneeFilter,
}

/// Returns the tasks that pass both filters, in their original order.
#[must_use]
pub fn project(tasks: &[Task], platform: PlatformFilter, assignee: &AssigneeFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| platform.matches(task.platform()) && assignee.matches(task.assigned_to()))
        .cloned()
        .collect()
}

/// Sums of story, development, and test points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointTotals {
    /// Total story points.
    pub story: u64,
    /// Total development points.
    pub development: u64,
    /// Total test points.
    pub test: u64,
}

/// Sums the points of every task. Unestimated tasks count as zero.
#[must_use]
pub fn totals(tasks: &[Task]) -> PointTotals {
    tasks.iter().fold(PointTotals::default(), |acc, task| PointTotals {
        story: acc.story + u64::from(task.story_point().value()),
        development: acc.development + u64::from(task.development_point().value()),
        test: acc.test + u64::from(task.test_point().value()),
    })
}

/// Task board projection shown by the sprint screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskBoard {
    visible: Vec<Task>,
    visible_totals: PointTotals,
    sprint_totals: PointTotals,
}

impl TaskBoard {
    /// Builds the board for a task list and filter selection.
    #[must_use]
    pub fn build(tasks: &[Task], filter: &TaskFilter) -> Self {
        let visible = project(tasks, filter.platform, &filter.assignee);
        let visible_totals = totals(&visible);
        Self {
            visible,
            visible_totals,
            sprint_totals: totals(tasks),
        }
    }

    /// Returns the tasks passing the filter.
    #[must_use]
    pub fn visible(&self) -> &[Task] {
        &self.visible
    }

    /// Returns the totals over the visible tasks.
    #[must_use]
    pub const fn visible_totals(&self) -> PointTotals {
        self.visible_totals
    }

    /// Returns the totals over every task of the sprint.
    #[must_use]
    pub const fn sprint_totals(&self) -> PointTotals {
        self.sprint_totals
    }
}
