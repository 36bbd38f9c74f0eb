//! Sprint record.

use super::SprintId;

/// A planning period identified by a user-chosen code.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprint {
    id: SprintId,
    holiday_count: Option<f64>,
    notes: Option<String>,
}

impl Sprint {
    /// Creates a sprint with no holidays or notes recorded.
    #[must_use]
    pub const fn new(id: SprintId) -> Self {
        Self {
            id,
            holiday_count: None,
            notes: None,
        }
    }

    /// Sets the number of holiday days in the sprint.
    #[must_use]
    pub const fn with_holiday_count(mut self, holiday_count: f64) -> Self {
        self.holiday_count = Some(holiday_count);
        self
    }

    /// Sets free-text sprint notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> &SprintId {
        &self.id
    }

    /// Returns the holiday count, if recorded.
    #[must_use]
    pub const fn holiday_count(&self) -> Option<f64> {
        self.holiday_count
    }

    /// Returns the sprint notes, if recorded.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
