//! Versioned field mapping between documents and planning records.
//!
//! Version 1 layout:
//!
//! | Path | Fields |
//! |---|---|
//! | `Sprints/{sprintId}` | `sprintId`, `holidayCount?`, `sprintNotes?`, `schemaVersion` |
//! | `Sprints/{sprintId}/Tasks/{taskId}` | `taskId`, `taskCode?`, `sprintId`, `summary`, `platform`, `storyPoint`, `developmentPoint`, `testPoint`, `assignedTo`, `notes`, `schemaVersion` |
//!
//! Documents without `schemaVersion` are read as version 0. Version 0
//! documents may lack `taskId` and `sprintId` (the key and the parent key are
//! used instead) and may store `sprintId` as a number. Missing point fields
//! read as zero, a missing assignee as [`UNASSIGNED`], and an unrecognised
//! platform as [`Platform::Unknown`].

use crate::planning::domain::{
    PersistedTaskData, PlanningDomainError, Platform, Points, Sprint, SprintId, Task, TaskCode,
    TaskId, TaskPatch, UNASSIGNED,
};
use crate::store::domain::{
    CollectionPath, CollectionQuery, Document, DocumentPath, Fields, OrderDirection, PathError,
};
use serde_json::{Number, Value};
use thiserror::Error;

/// Schema version written with every document.
pub const SCHEMA_VERSION: u64 = 1;

/// Top-level sprint collection.
pub const SPRINTS_COLLECTION: &str = "Sprints";

/// Task sub-collection under each sprint document.
pub const TASKS_COLLECTION: &str = "Tasks";

const SCHEMA_VERSION_FIELD: &str = "schemaVersion";
const SPRINT_ID: &str = "sprintId";
const HOLIDAY_COUNT: &str = "holidayCount";
const SPRINT_NOTES: &str = "sprintNotes";
const TASK_ID: &str = "taskId";
const TASK_CODE: &str = "taskCode";
const SUMMARY: &str = "summary";
const PLATFORM: &str = "platform";
const STORY_POINT: &str = "storyPoint";
const DEVELOPMENT_POINT: &str = "developmentPoint";
const TEST_POINT: &str = "testPoint";
const ASSIGNED_TO: &str = "assignedTo";
const NOTES: &str = "notes";

/// Errors raised while mapping documents to records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A field holds a value of the wrong type.
    #[error("field '{field}' of {path}: expected {expected}")]
    WrongType {
        /// Document path.
        path: String,
        /// Field name.
        field: &'static str,
        /// Expected value kind.
        expected: &'static str,
    },

    /// A field holds a value the domain rejects.
    #[error("field '{field}' of {path}: {source}")]
    InvalidValue {
        /// Document path.
        path: String,
        /// Field name.
        field: &'static str,
        /// Domain validation error.
        source: PlanningDomainError,
    },

    /// The document was written by a newer schema.
    #[error("{path} uses schema version {found}, newest supported is {}", SCHEMA_VERSION)]
    UnsupportedVersion {
        /// Document path.
        path: String,
        /// Version found in the document.
        found: u64,
    },

    /// A single-document subscription found no document.
    #[error("document not found: {0}")]
    Missing(String),

    /// A record identifier cannot be used as a document key.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Returns the sprint collection path.
///
/// # Errors
///
/// Returns [`SchemaError::Path`] if the collection name is rejected.
pub fn sprints_collection() -> Result<CollectionPath, SchemaError> {
    Ok(CollectionPath::root(SPRINTS_COLLECTION)?)
}

/// Returns the live query listing sprints by ascending identifier.
///
/// # Errors
///
/// Returns [`SchemaError::Path`] if the collection name is rejected.
pub fn sprints_query() -> Result<CollectionQuery, SchemaError> {
    Ok(CollectionQuery::new(sprints_collection()?).order_by(SPRINT_ID, OrderDirection::Ascending))
}

/// Returns the document path of a sprint.
///
/// # Errors
///
/// Returns [`SchemaError::Path`] if the identifier is not a valid key.
pub fn sprint_path(id: &SprintId) -> Result<DocumentPath, SchemaError> {
    Ok(sprints_collection()?.doc(id.as_str())?)
}

/// Returns the task collection of a sprint.
///
/// # Errors
///
/// Returns [`SchemaError::Path`] if the identifier is not a valid key.
pub fn tasks_collection(sprint_id: &SprintId) -> Result<CollectionPath, SchemaError> {
    Ok(sprint_path(sprint_id)?.subcollection(TASKS_COLLECTION)?)
}

/// Returns the document path of a task.
///
/// # Errors
///
/// Returns [`SchemaError::Path`] if either identifier is not a valid key.
pub fn task_path(sprint_id: &SprintId, task_id: &TaskId) -> Result<DocumentPath, SchemaError> {
    Ok(tasks_collection(sprint_id)?.doc(task_id.as_str())?)
}

fn versioned() -> Fields {
    let mut fields = Fields::new();
    fields.insert(SCHEMA_VERSION_FIELD.to_owned(), Value::from(SCHEMA_VERSION));
    fields
}

/// Encodes a sprint for a merge write under `id`.
///
/// Unset optional properties are omitted so a merge keeps stored values.
#[must_use]
pub fn encode_sprint(id: &SprintId, sprint: &Sprint) -> Fields {
    let mut fields = versioned();
    fields.insert(SPRINT_ID.to_owned(), Value::from(id.as_str()));
    if let Some(number) = sprint.holiday_count().and_then(Number::from_f64) {
        fields.insert(HOLIDAY_COUNT.to_owned(), Value::Number(number));
    }
    if let Some(notes) = sprint.notes() {
        fields.insert(SPRINT_NOTES.to_owned(), Value::from(notes));
    }
    fields
}

/// Encodes every field of a task.
#[must_use]
pub fn encode_task(task: &Task) -> Fields {
    let mut fields = versioned();
    fields.insert(TASK_ID.to_owned(), Value::from(task.id().as_str()));
    if let Some(code) = task.task_code() {
        fields.insert(TASK_CODE.to_owned(), Value::from(code.as_str()));
    }
    fields.insert(SPRINT_ID.to_owned(), Value::from(task.sprint_id().as_str()));
    fields.insert(SUMMARY.to_owned(), Value::from(task.summary()));
    fields.insert(PLATFORM.to_owned(), Value::from(task.platform().as_str()));
    fields.insert(STORY_POINT.to_owned(), Value::from(task.story_point().value()));
    fields.insert(
        DEVELOPMENT_POINT.to_owned(),
        Value::from(task.development_point().value()),
    );
    fields.insert(TEST_POINT.to_owned(), Value::from(task.test_point().value()));
    fields.insert(ASSIGNED_TO.to_owned(), Value::from(task.assigned_to()));
    fields.insert(NOTES.to_owned(), Value::from(task.notes()));
    fields
}

/// Encodes only the fields set in a patch.
#[must_use]
pub fn encode_task_patch(patch: &TaskPatch) -> Fields {
    let mut fields = versioned();
    if let Some(code) = &patch.task_code {
        fields.insert(TASK_CODE.to_owned(), Value::from(code.as_str()));
    }
    if let Some(summary) = &patch.summary {
        fields.insert(SUMMARY.to_owned(), Value::from(summary.as_str()));
    }
    if let Some(platform) = patch.platform {
        fields.insert(PLATFORM.to_owned(), Value::from(platform.as_str()));
    }
    if let Some(points) = patch.story_point {
        fields.insert(STORY_POINT.to_owned(), Value::from(points.value()));
    }
    if let Some(points) = patch.development_point {
        fields.insert(DEVELOPMENT_POINT.to_owned(), Value::from(points.value()));
    }
    if let Some(points) = patch.test_point {
        fields.insert(TEST_POINT.to_owned(), Value::from(points.value()));
    }
    if let Some(assigned_to) = &patch.assigned_to {
        fields.insert(ASSIGNED_TO.to_owned(), Value::from(assigned_to.as_str()));
    }
    if let Some(notes) = &patch.notes {
        fields.insert(NOTES.to_owned(), Value::from(notes.as_str()));
    }
    fields
}

/// Typed field reader over one document.
struct Reader<'a> {
    document: &'a Document,
}

impl<'a> Reader<'a> {
    fn new(document: &'a Document) -> Result<Self, SchemaError> {
        let reader = Self { document };
        let version = reader.u64_field(SCHEMA_VERSION_FIELD)?.unwrap_or(0);
        if version > SCHEMA_VERSION {
            return Err(SchemaError::UnsupportedVersion {
                path: document.path().to_string(),
                found: version,
            });
        }
        Ok(reader)
    }

    fn wrong_type(&self, field: &'static str, expected: &'static str) -> SchemaError {
        SchemaError::WrongType {
            path: self.document.path().to_string(),
            field,
            expected,
        }
    }

    fn invalid(&self, field: &'static str, source: PlanningDomainError) -> SchemaError {
        SchemaError::InvalidValue {
            path: self.document.path().to_string(),
            field,
            source,
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.document.field(field).filter(|value| !value.is_null())
    }

    fn string(&self, field: &'static str) -> Result<Option<String>, SchemaError> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(self.wrong_type(field, "a string")),
        }
    }

    /// Reads an identifier stored as a string or, in old documents, a number.
    fn key_text(&self, field: &'static str) -> Result<Option<String>, SchemaError> {
        match self.present(field) {
            Some(Value::Number(number)) if number.is_u64() || number.is_i64() => {
                Ok(Some(number.to_string()))
            }
            _ => self.string(field),
        }
    }

    fn u64_field(&self, field: &'static str) -> Result<Option<u64>, SchemaError> {
        match self.present(field) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "a non-negative integer")),
        }
    }

    fn f64_field(&self, field: &'static str) -> Result<Option<f64>, SchemaError> {
        match self.present(field) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "a number")),
        }
    }

    fn points(&self, field: &'static str) -> Result<Points, SchemaError> {
        let Some(raw) = self.u64_field(field)? else {
            return Ok(Points::ZERO);
        };
        u32::try_from(raw)
            .map(Points::new)
            .map_err(|_| self.invalid(field, PlanningDomainError::InvalidPoints(raw.to_string())))
    }
}

/// Decodes a sprint document.
///
/// # Errors
///
/// Returns [`SchemaError`] when a field has the wrong type, the stored
/// identifier is invalid, or the schema version is unsupported.
pub fn decode_sprint(document: &Document) -> Result<Sprint, SchemaError> {
    let reader = Reader::new(document)?;
    let raw_id = reader
        .key_text(SPRINT_ID)?
        .unwrap_or_else(|| document.key().to_owned());
    let id = SprintId::new(raw_id).map_err(|err| reader.invalid(SPRINT_ID, err))?;

    let mut sprint = Sprint::new(id);
    if let Some(holiday_count) = reader.f64_field(HOLIDAY_COUNT)? {
        sprint = sprint.with_holiday_count(holiday_count);
    }
    if let Some(notes) = reader.string(SPRINT_NOTES)? {
        sprint = sprint.with_notes(notes);
    }
    Ok(sprint)
}

/// Decodes a task document found under `sprint_id`.
///
/// # Errors
///
/// Returns [`SchemaError`] when a field has the wrong type, an identifier is
/// invalid, or the schema version is unsupported.
pub fn decode_task(document: &Document, sprint_id: &SprintId) -> Result<Task, SchemaError> {
    let reader = Reader::new(document)?;

    let raw_task_id = reader
        .string(TASK_ID)?
        .unwrap_or_else(|| document.key().to_owned());
    let id = TaskId::new(raw_task_id).map_err(|err| reader.invalid(TASK_ID, err))?;

    let task_code = match reader.string(TASK_CODE)? {
        Some(code) if !code.trim().is_empty() => {
            Some(TaskCode::new(code).map_err(|err| reader.invalid(TASK_CODE, err))?)
        }
        _ => None,
    };

    let owner = match reader.key_text(SPRINT_ID)? {
        Some(raw) => SprintId::new(raw).map_err(|err| reader.invalid(SPRINT_ID, err))?,
        None => sprint_id.clone(),
    };

    let platform = reader
        .string(PLATFORM)?
        .map_or(Platform::Unknown, |label| Platform::from_label(&label));

    Ok(Task::from_persisted(PersistedTaskData {
        id,
        task_code,
        sprint_id: owner,
        summary: reader.string(SUMMARY)?.unwrap_or_default(),
        platform,
        story_point: reader.points(STORY_POINT)?,
        development_point: reader.points(DEVELOPMENT_POINT)?,
        test_point: reader.points(TEST_POINT)?,
        assigned_to: reader
            .string(ASSIGNED_TO)?
            .unwrap_or_else(|| UNASSIGNED.to_owned()),
        notes: reader.string(NOTES)?.unwrap_or_default(),
    }))
}
