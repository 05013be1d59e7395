//! Validation pass orchestration.
//!
//! [`WorkflowValidator`] owns the currently-loaded schema snapshot and the
//! per-document diagnostics, and reacts to workspace events. One validation
//! pass is atomic and runs to completion:
//!
//! ```text
//! Parse ─ errors? ─ yes → parse-error diagnostics → End
//!            │no
//!            ▼
//!    strict data parse ─ fails? ─ yes → single fallback diagnostic → End
//!            │no
//!            ▼
//!        Validate ─ no issues → empty set (clears prior) → End
//!            │issues
//!            ▼
//!       ResolveEach → ranged diagnostics → End
//! ```
//!
//! With no schema loaded the pass short-circuits to an empty set before
//! parsing; a missing schema is not a document error.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::diagnostics::{self, DiagnosticCollection};
use crate::error::Result;
use crate::text::{self, LineIndex};
use crate::types::{Diagnostic, Range, WorkflowSchema};
use crate::validation;

use super::FlowSchemaConfig;

/// External events the validator reacts to.
#[derive(Debug, Clone)]
pub enum WorkspaceEvent {
    /// A document came into view; validate it.
    DocumentOpened { name: String, text: String },
    /// A document was saved; validate it.
    DocumentSaved { name: String, text: String },
    /// Host configuration changed: the collaborator re-fetched the schema
    /// definition (or failed to, yielding `None`). Replaces the loaded
    /// schema wholesale; already-open documents are not re-validated.
    ConfigurationChanged { definition: Option<JsonValue> },
}

/// Holds the loaded schema and per-document diagnostics across passes.
#[derive(Debug, Default)]
pub struct WorkflowValidator {
    config: FlowSchemaConfig,
    schema: Option<Arc<WorkflowSchema>>,
    diagnostics: DiagnosticCollection,
}

impl WorkflowValidator {
    pub fn new(config: FlowSchemaConfig) -> Self {
        Self {
            config,
            schema: None,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Currently loaded schema snapshot, if any.
    pub fn schema(&self) -> Option<Arc<WorkflowSchema>> {
        self.schema.clone()
    }

    pub fn config(&self) -> &FlowSchemaConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Interpret a freshly-loaded schema definition and make it the active
    /// schema. On failure the previous schema is dropped as well: a broken
    /// definition disables validation rather than validating against stale
    /// constraints.
    pub fn load_schema(&mut self, definition: &JsonValue) -> Result<()> {
        match WorkflowSchema::interpret(definition) {
            Ok(schema) => {
                tracing::info!(
                    name = schema.name.as_deref().unwrap_or("<unnamed>"),
                    "workflow schema loaded"
                );
                self.schema = Some(Arc::new(schema));
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "schema definition rejected, validation disabled");
                self.schema = None;
                Err(error)
            }
        }
    }

    /// Drop the loaded schema; subsequent passes produce no diagnostics.
    pub fn clear_schema(&mut self) {
        self.schema = None;
    }

    /// React to one workspace event. Returns the resulting diagnostic set
    /// for document events, `None` for configuration changes (schema reload
    /// does not re-validate open documents).
    pub fn handle_event(&mut self, event: WorkspaceEvent) -> Option<&[Diagnostic]> {
        match event {
            WorkspaceEvent::DocumentOpened { name, text }
            | WorkspaceEvent::DocumentSaved { name, text } => {
                Some(self.validate_document(&name, &text))
            }
            WorkspaceEvent::ConfigurationChanged { definition } => {
                match definition {
                    Some(definition) => {
                        // Interpretation failure already logged; the event
                        // carries no channel to report it further.
                        let _ = self.load_schema(&definition);
                    }
                    None => self.clear_schema(),
                }
                None
            }
        }
    }

    /// Run one validation pass for a document and store the result,
    /// replacing any previous diagnostics for that document.
    pub fn validate_document(&mut self, name: &str, text: &str) -> &[Diagnostic] {
        let schema = self
            .config
            .enable_validation
            .then_some(self.schema.as_deref())
            .flatten();
        let diagnostics = run_validation_pass(text, schema);
        tracing::debug!(
            document = name,
            count = diagnostics.len(),
            "validation pass complete"
        );
        self.diagnostics.set(name, diagnostics);
        self.diagnostics.get(name)
    }
}

/// One atomic validation pass over a document's text.
///
/// Stateless: everything the pass needs is in its arguments, so interleaved
/// passes for different documents cannot observe each other.
pub fn run_validation_pass(text: &str, schema: Option<&WorkflowSchema>) -> Vec<Diagnostic> {
    let Some(schema) = schema else {
        return Vec::new();
    };

    let outcome = text::parse(text);
    let index = LineIndex::new(text);

    if !outcome.is_clean() {
        return outcome
            .errors
            .iter()
            .map(|error| diagnostics::parse_error_diagnostic(error, &index))
            .collect();
    }

    // The tolerant parse found no errors, so the strict parse is expected to
    // succeed; when it does not (depth limits, numeric anomalies) the text
    // is still not validatable and the failure surfaces at the fallback
    // range.
    let data: JsonValue = match serde_json::from_str(text) {
        Ok(data) => data,
        Err(error) => {
            return vec![Diagnostic::error(
                Range::default(),
                format!("Error parsing JSON: {error}"),
            )];
        }
    };

    let issues = validation::validate(&data, schema);
    let Some(root) = outcome.root else {
        return Vec::new();
    };

    issues
        .iter()
        .map(|issue| diagnostics::resolve(issue, &root, &index))
        .collect()
}
