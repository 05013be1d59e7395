//! # Flowschema
//!
//! A Rust library for validating workflow documents (JSON files describing
//! automation pipelines) against dynamically-loaded schema definitions,
//! with position-aware diagnostics.
//!
//! ## Features
//!
//! - **Tolerant Parsing**: position-preserving JSON parser that recovers
//!   from syntax errors, so half-edited documents still produce useful
//!   diagnostics
//! - **Schema-as-Data**: schema definitions arrive at runtime as plain
//!   JSON data and are interpreted (or rejected) on load
//! - **Precise Locations**: every validation finding is resolved back to a
//!   line/column range over the offending value
//! - **Remote Integration**: schema fetching and workflow upload against a
//!   workflow server (`remote` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use flowschema::{FlowSchemaConfig, WorkflowValidator, embedded};
//!
//! # fn example() -> flowschema::Result<()> {
//! let mut validator = WorkflowValidator::new(FlowSchemaConfig::default());
//! validator.load_schema(&embedded::default_schema_definition())?;
//!
//! let diagnostics =
//!     validator.validate_document("wf.json", r#"{"name": "wf1", "nodes": []}"#);
//! assert!(diagnostics.is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`text`] - tolerant, position-preserving JSON parsing
//! - [`types`] - schema definitions, issues, diagnostics
//! - [`validation`] - structural validation of data against a schema
//! - [`diagnostics`] - issue-to-range resolution and per-document sets
//! - [`core`] - configuration, events, and pass orchestration
//! - [`remote`] - schema loading and workflow upload over HTTP
//! - [`embedded`] - bundled default schema definition

pub mod core;
pub mod diagnostics;
pub mod embedded;
pub mod error;
#[cfg(feature = "remote")]
pub mod remote;
pub mod text;
pub mod types;
pub mod validation;

pub use crate::core::{FlowSchemaConfig, WorkflowValidator, WorkspaceEvent, run_validation_pass};
pub use diagnostics::{DiagnosticCollection, node_at_path, parse_error_diagnostic, resolve};
pub use error::{FlowSchemaError, Result};
pub use text::{LineIndex, NodeKind, ParseError, ParseOutcome, SyntaxNode, parse};
pub use types::{
    Diagnostic, FieldType, IssueCode, PathSegment, Position, Range, SchemaField, Severity,
    ValidationIssue, WorkflowSchema,
};
pub use validation::validate;

#[cfg(feature = "remote")]
pub use remote::{HttpSchemaSource, SchemaSource, UploadOutcome, WorkflowClient};
