//! Workflow schema definitions.
//!
//! A [`WorkflowSchema`] is loaded from external data at runtime (typically
//! fetched from the workflow server), never fixed at compile time. The shape
//! of incoming data is unknown: [`WorkflowSchema::interpret`] either produces
//! a usable definition or a [`FlowSchemaError::Schema`] that callers treat as
//! the validation-disabled state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{FlowSchemaError, Result};

/// Value types a field constraint can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    /// No type constraint; the field may hold anything.
    Any,
}

/// Constraint set for a single field of a workflow document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaField {
    /// Required value type. Absent means any type is accepted.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<FieldType>,

    /// Member names that must be present, for object fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Nested member constraints, for object fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, SchemaField>>,

    /// Constraint applied to every element, for array fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaField>>,

    /// Regular expression a string value must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Enumeration of allowed values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<JsonValue>>,
}

/// A complete, data-described workflow document schema.
///
/// Lifecycle: absent (validation disabled) → loaded → replaced wholesale on
/// reload → absent again on load failure. Holders keep it behind an
/// immutable snapshot; it is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSchema {
    /// Human-readable schema name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Schema revision, as reported by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Top-level member names that must be present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Constraints for the document's top-level members.
    pub fields: HashMap<String, SchemaField>,
}

impl WorkflowSchema {
    /// Interpret externally-loaded data as a schema definition.
    ///
    /// Unknown extra keys are ignored; a definition whose recognized parts do
    /// not form a schema (wrong root shape, unknown type names, malformed
    /// patterns) is rejected as a whole.
    pub fn interpret(definition: &JsonValue) -> Result<WorkflowSchema> {
        if !is_schema_definition(definition) {
            return Err(FlowSchemaError::schema(
                "definition is not an object with a `fields` map",
            ));
        }
        let schema: WorkflowSchema = serde_json::from_value(definition.clone())
            .map_err(|e| FlowSchemaError::schema(format!("definition not interpretable: {e}")))?;
        schema.check_patterns()?;
        Ok(schema)
    }

    /// Reject definitions whose regex patterns would fail at validation time.
    fn check_patterns(&self) -> Result<()> {
        fn check(field: &SchemaField) -> Result<()> {
            if let Some(pattern) = &field.pattern {
                regex::Regex::new(pattern).map_err(|e| {
                    FlowSchemaError::schema(format!("invalid pattern `{pattern}`: {e}"))
                })?;
            }
            if let Some(fields) = &field.fields {
                for nested in fields.values() {
                    check(nested)?;
                }
            }
            if let Some(items) = &field.items {
                check(items)?;
            }
            Ok(())
        }
        for field in self.fields.values() {
            check(field)?;
        }
        Ok(())
    }
}

/// Check whether a JSON value looks like a workflow schema definition.
pub fn is_schema_definition(value: &JsonValue) -> bool {
    value.is_object() && value.get("fields").is_some_and(JsonValue::is_object)
}
