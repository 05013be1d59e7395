//! Core type definitions.
//!
//! - [`schema`] - data-described workflow schema definitions
//! - [`issue`] - validation findings with logical paths
//! - [`diagnostic`] - ranged diagnostics for display

pub mod diagnostic;
pub mod issue;
pub mod schema;

pub use diagnostic::{Diagnostic, Position, Range, Severity};
pub use issue::{IssueCode, PathSegment, ValidationIssue};
pub use schema::{FieldType, SchemaField, WorkflowSchema, is_schema_definition};
