//! Unit tests for the planning module.
//!
//! Tests are organised by concern: domain values, the derived board, the
//! task form, the document schema, envelope folding, and the view models.
