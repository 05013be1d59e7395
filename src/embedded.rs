//! Bundled default schema definition.
//!
//! Used until a definition has been fetched from the server, and by tests
//! and the CLI as a known-good baseline. Kept as data, not as types, so it
//! goes through exactly the same [`crate::types::WorkflowSchema::interpret`]
//! gate as a remote definition.

use serde_json::{Value as JsonValue, json};

/// Default workflow schema definition: a named document with an array of
/// typed nodes, optional connections between them, and a handful of
/// top-level settings.
pub fn default_schema_definition() -> JsonValue {
    json!({
        "name": "workflow",
        "version": "1",
        "required": ["name", "nodes"],
        "fields": {
            "name": { "type": "string" },
            "nodes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "type"],
                    "fields": {
                        "name": { "type": "string" },
                        "type": { "type": "string" },
                        "parameters": { "type": "object" }
                    }
                }
            },
            "connections": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["source", "destination"],
                    "fields": {
                        "source": { "type": "string" },
                        "destination": { "type": "string" }
                    }
                }
            },
            "active": { "type": "boolean" },
            "settings": { "type": "object" },
            "version": { "type": "number" }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkflowSchema;
    use crate::validation::validate;
    use serde_json::json;

    #[test]
    fn default_definition_interprets_cleanly() {
        let schema = WorkflowSchema::interpret(&default_schema_definition()).unwrap();
        assert!(schema.fields.contains_key("nodes"));
        assert!(schema.fields.contains_key("connections"));
    }

    #[test]
    fn accepts_a_complete_workflow() {
        let schema = WorkflowSchema::interpret(&default_schema_definition()).unwrap();
        let workflow = json!({
            "name": "sync-invoices",
            "active": true,
            "version": 3,
            "nodes": [
                { "name": "fetch", "type": "http-request", "parameters": { "url": "https://example.test" } },
                { "name": "store", "type": "database", "parameters": {} }
            ],
            "connections": [
                { "source": "fetch", "destination": "store" }
            ]
        });
        assert!(validate(&workflow, &schema).is_empty());
    }

    #[test]
    fn flags_untyped_node() {
        let schema = WorkflowSchema::interpret(&default_schema_definition()).unwrap();
        let workflow = json!({
            "name": "wf1",
            "nodes": [{ "name": "A" }]
        });
        let issues = validate(&workflow, &schema);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path_string(), "nodes.0.type");
    }
}
