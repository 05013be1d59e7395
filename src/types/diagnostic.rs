//! Ranged diagnostics attached to a document.

use serde::{Deserialize, Serialize};

/// Zero-based line/column location in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Half-open text range between two positions.
///
/// The default range `{0,0}-{0,0}` doubles as the fallback location for
/// findings that cannot be mapped back to a source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// True for the `{0,0}-{0,0}` fallback range.
    pub fn is_fallback(&self) -> bool {
        *self == Self::default()
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One ranged, severity-tagged annotation for display in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(range: Range, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_is_fallback() {
        assert!(Range::default().is_fallback());
        let range = Range::new(Position { line: 0, column: 0 }, Position { line: 0, column: 1 });
        assert!(!range.is_fallback());
    }

    #[test]
    fn diagnostic_serializes_with_lowercase_severity() {
        let diagnostic = Diagnostic::error(Range::default(), "boom");
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["range"]["start"]["line"], 0);
    }
}
