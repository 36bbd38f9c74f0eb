//! Document values, write modes, and collection queries.

use super::{CollectionPath, DocumentPath};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;

/// Field map stored in a document.
pub type Fields = serde_json::Map<String, Value>;

/// A stored document together with its store-assigned metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: DocumentPath,
    fields: Fields,
    update_time: DateTime<Utc>,
}

impl Document {
    /// Creates a document snapshot.
    #[must_use]
    pub const fn new(path: DocumentPath, fields: Fields, update_time: DateTime<Utc>) -> Self {
        Self {
            path,
            fields,
            update_time,
        }
    }

    /// Returns the document path.
    #[must_use]
    pub const fn path(&self) -> &DocumentPath {
        &self.path
    }

    /// Returns the document key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.path.key()
    }

    /// Returns the stored fields.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns a single field value, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the time of the last write to this document.
    #[must_use]
    pub const fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }
}

/// How a `set` write treats fields already stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the whole document with the written fields.
    Overwrite,
    /// Overwrite only the written fields and keep the others.
    Merge,
}

/// Sort direction for collection queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// Ordering clause of a collection query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Field to sort on.
    pub field: String,
    /// Sort direction.
    pub direction: OrderDirection,
}

/// Live query over every document of one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    collection: CollectionPath,
    order_by: Option<OrderBy>,
}

impl CollectionQuery {
    /// Creates a query returning documents in key order.
    #[must_use]
    pub const fn new(collection: CollectionPath) -> Self {
        Self {
            collection,
            order_by: None,
        }
    }

    /// Orders results by a field.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Returns the queried collection.
    #[must_use]
    pub const fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Returns the ordering clause, if any.
    #[must_use]
    pub const fn ordering(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    /// Sorts documents according to the ordering clause.
    ///
    /// The sort is stable, so documents with equal values keep key order.
    pub fn sort(&self, documents: &mut [Document]) {
        let Some(order) = &self.order_by else {
            return;
        };
        documents.sort_by(|left, right| {
            let ordering = compare_values(left.field(&order.field), right.field(&order.field));
            match order.direction {
                OrderDirection::Ascending => ordering,
                OrderDirection::Descending => ordering.reverse(),
            }
        });
    }
}

/// Type rank used when comparing values of different JSON types.
const fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&b.as_f64().unwrap_or_default()),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}
