//! Resolution of validation findings into ranged diagnostics.
//!
//! The resolver walks the position-annotated parse tree along an issue's
//! logical path and converts the matched node's byte span into a line/column
//! range. An unresolvable path is an expected outcome, not an error: the
//! diagnostic falls back to the `{0,0}-{0,0}` range so that a finding is
//! always surfaced, and the miss is logged at debug level.

use std::collections::HashMap;

use crate::text::{LineIndex, ParseError, SyntaxNode};
use crate::types::{Diagnostic, PathSegment, Range, ValidationIssue};

/// Walk the parse tree from `root`, descending into the child matching each
/// path segment: member lookup for objects, index lookup for arrays.
///
/// Returns `None` when any segment fails to match (missing member, index out
/// of range, or a segment kind that does not fit the node kind).
pub fn node_at_path<'a>(root: &'a SyntaxNode, path: &[PathSegment]) -> Option<&'a SyntaxNode> {
    let mut node = root;
    for segment in path {
        node = match segment {
            PathSegment::Key(key) => node.member(key)?,
            PathSegment::Index(index) => node.element(*index)?,
        };
    }
    Some(node)
}

/// Resolve one validation issue into a diagnostic.
///
/// The message format is fixed:
/// `Validation Error: <issue message> (path: <segments joined by '.'>)`.
pub fn resolve(issue: &ValidationIssue, root: &SyntaxNode, index: &LineIndex<'_>) -> Diagnostic {
    let range = match node_at_path(root, &issue.path) {
        Some(node) => index.range(node.offset, node.end()),
        None => {
            tracing::debug!(
                path = %issue.path_string(),
                "no parse tree node for issue path, using fallback range"
            );
            Range::default()
        }
    };

    Diagnostic::error(
        range,
        format!(
            "Validation Error: {} (path: {})",
            issue.message,
            issue.path_string()
        ),
    )
}

/// Map one syntax error straight onto its offending span.
pub fn parse_error_diagnostic(error: &ParseError, index: &LineIndex<'_>) -> Diagnostic {
    Diagnostic::error(
        index.range(error.offset, error.offset + error.length),
        format!("JSON Parsing Error: {}", error.message),
    )
}

/// Per-document diagnostic sets.
///
/// Each validation pass produces the complete set for one document; `set`
/// replaces whatever was there before, so diagnostics never accumulate
/// across passes.
#[derive(Debug, Default)]
pub struct DiagnosticCollection {
    documents: HashMap<String, Vec<Diagnostic>>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the diagnostic set for one document.
    pub fn set(&mut self, document: impl Into<String>, diagnostics: Vec<Diagnostic>) {
        self.documents.insert(document.into(), diagnostics);
    }

    /// Diagnostics currently attached to a document.
    pub fn get(&self, document: &str) -> &[Diagnostic] {
        self.documents.get(document).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop one document's diagnostics entirely.
    pub fn remove(&mut self, document: &str) {
        self.documents.remove(document);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn documents(&self) -> impl Iterator<Item = (&str, &[Diagnostic])> {
        self.documents
            .iter()
            .map(|(name, diagnostics)| (name.as_str(), diagnostics.as_slice()))
    }
}
