//! Validation findings with logical paths into the data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step from the data root towards a value: an object member name or an
/// array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Stable code identifying the kind of check that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    Required,
    InvalidType,
    ExpectedArray,
    UnexpectedArray,
    PatternMismatch,
    InvalidValue,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            IssueCode::Required => "required",
            IssueCode::InvalidType => "invalid-type",
            IssueCode::ExpectedArray => "expected-array",
            IssueCode::UnexpectedArray => "unexpected-array",
            IssueCode::PatternMismatch => "pattern-mismatch",
            IssueCode::InvalidValue => "invalid-value",
        };
        write!(f, "{code}")
    }
}

/// One schema-violation finding.
///
/// The path identifies the offending value's position in the data tree, e.g.
/// `nodes.2.type` for the third node's `type` member. Issues are produced
/// fresh on every validation pass and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: Vec<PathSegment>,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, message: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
        }
    }

    /// Path segments joined by `.`, the form used in diagnostic messages.
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_string_joins_keys_and_indices() {
        let issue = ValidationIssue::new(
            IssueCode::Required,
            "Required field type is missing",
            vec!["nodes".into(), 0.into(), "type".into()],
        );
        assert_eq!(issue.path_string(), "nodes.0.type");
    }

    #[test]
    fn issue_code_displays_kebab_case() {
        assert_eq!(IssueCode::InvalidType.to_string(), "invalid-type");
        assert_eq!(IssueCode::Required.to_string(), "required");
    }
}
