//! Schema validation of workflow document data.
//!
//! [`validate`] is a pure structural check of a plain data value against a
//! [`WorkflowSchema`]: required members, type compatibility, recursion into
//! nested object and array constraints, plus pattern and enumerated-value
//! checks. Every failing check yields one [`ValidationIssue`] carrying the
//! logical path to the offending value; failures accumulate and never stop
//! the pass.

use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::types::{FieldType, IssueCode, PathSegment, SchemaField, ValidationIssue, WorkflowSchema};

/// Validation state tracking the current path into the data.
struct ValidationContext {
    path: Vec<PathSegment>,
    issues: Vec<ValidationIssue>,
}

impl ValidationContext {
    fn new() -> Self {
        Self {
            path: Vec::new(),
            issues: Vec::new(),
        }
    }

    fn push(&mut self, segment: impl Into<PathSegment>) {
        self.path.push(segment.into());
    }

    fn pop(&mut self) {
        self.path.pop();
    }

    fn add_issue(&mut self, code: IssueCode, message: impl Into<String>) {
        self.issues
            .push(ValidationIssue::new(code, message, self.path.clone()));
    }
}

/// Validate a data value against a schema definition.
///
/// Pure function of its inputs; issue order follows a depth-first walk of
/// the data, so repeated passes over unchanged inputs produce identical
/// results.
pub fn validate(data: &JsonValue, schema: &WorkflowSchema) -> Vec<ValidationIssue> {
    let mut context = ValidationContext::new();

    match data {
        JsonValue::Object(object) => {
            validate_members(
                &mut context,
                object,
                &schema.fields,
                schema.required.as_deref(),
            );
        }
        other => {
            context.add_issue(
                IssueCode::InvalidType,
                format!("Expected object, received {}", json_type_name(other)),
            );
        }
    }

    context.issues
}

/// Check one object's members: required presence first, then each present
/// member against its constraint. Members without a constraint pass through
/// untouched.
fn validate_members(
    context: &mut ValidationContext,
    object: &serde_json::Map<String, JsonValue>,
    fields: &HashMap<String, SchemaField>,
    required: Option<&[String]>,
) {
    if let Some(required) = required {
        for name in required {
            if !object.contains_key(name) {
                context.push(name.as_str());
                context.add_issue(
                    IssueCode::Required,
                    format!("Required field {name} is missing"),
                );
                context.pop();
            }
        }
    }

    for (key, value) in object {
        if let Some(field) = fields.get(key) {
            context.push(key.as_str());
            validate_field(context, value, field);
            context.pop();
        }
    }
}

/// Check one value against one field constraint.
fn validate_field(context: &mut ValidationContext, value: &JsonValue, field: &SchemaField) {
    if let Some(expected) = field.type_name
        && !type_matches(value, expected)
    {
        match expected {
            FieldType::Array => context.add_issue(
                IssueCode::ExpectedArray,
                format!("Expected array, received {}", json_type_name(value)),
            ),
            _ if value.is_array() => {
                context.add_issue(IssueCode::UnexpectedArray, "Unexpected array");
            }
            _ => context.add_issue(
                IssueCode::InvalidType,
                format!(
                    "Expected {}, received {}",
                    type_label(expected),
                    json_type_name(value)
                ),
            ),
        }
        return;
    }

    if let Some(pattern) = &field.pattern
        && let Some(text) = value.as_str()
        && let Ok(regex) = Regex::new(pattern)
        && !regex.is_match(text)
    {
        context.add_issue(
            IssueCode::PatternMismatch,
            format!("Value does not match pattern {pattern}"),
        );
    }

    if let Some(allowed) = &field.values
        && !allowed.contains(value)
    {
        context.add_issue(
            IssueCode::InvalidValue,
            format!("Value is not one of the {} allowed values", allowed.len()),
        );
    }

    match value {
        JsonValue::Object(object) => {
            if field.fields.is_some() || field.required.is_some() {
                let empty = HashMap::new();
                let fields = field.fields.as_ref().unwrap_or(&empty);
                validate_members(context, object, fields, field.required.as_deref());
            }
        }
        JsonValue::Array(items) => {
            if let Some(item_field) = &field.items {
                for (index, item) in items.iter().enumerate() {
                    context.push(index);
                    validate_field(context, item, item_field);
                    context.pop();
                }
            }
        }
        _ => {}
    }
}

fn type_matches(value: &JsonValue, expected: FieldType) -> bool {
    match expected {
        FieldType::String => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Object => value.is_object(),
        FieldType::Array => value.is_array(),
        FieldType::Any => true,
    }
}

fn type_label(expected: FieldType) -> &'static str {
    match expected {
        FieldType::String => "string",
        FieldType::Number => "number",
        FieldType::Boolean => "boolean",
        FieldType::Object => "object",
        FieldType::Array => "array",
        FieldType::Any => "any",
    }
}

/// JSON type name for error messages.
fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
