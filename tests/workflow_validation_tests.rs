use flowschema::{
    FlowSchemaConfig, Position, WorkflowSchema, WorkflowValidator, WorkspaceEvent, embedded,
    run_validation_pass,
};
use serde_json::json;

fn node_schema() -> WorkflowSchema {
    WorkflowSchema::interpret(&json!({
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
                        "type": { "type": "string" }
                    }
                }
            }
        }
    }))
    .unwrap()
}

#[test]
fn missing_node_type_is_reported_over_the_node_span() {
    let text = r#"{"name": "wf1", "nodes": [{"name": "A"}]}"#;
    let diagnostics = run_validation_pass(text, Some(&node_schema()));

    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert!(diagnostic.message.contains("path: nodes.0.type"));
    assert!(diagnostic.message.starts_with("Validation Error: "));

    // The `type` member is absent from the document, so the path cannot
    // resolve to a node and the finding falls back to the document start.
    assert!(diagnostic.range.is_fallback());
}

#[test]
fn present_but_mistyped_member_gets_its_exact_range() {
    let text = r#"{"name": "wf1", "nodes": [{"name": "A", "type": 7}]}"#;
    let diagnostics = run_validation_pass(text, Some(&node_schema()));

    assert_eq!(diagnostics.len(), 1);
    let span = r#"7"#;
    let offset = text.find(span).unwrap() as u32;
    assert_eq!(
        diagnostics[0].range.start,
        Position { line: 0, column: offset }
    );
    assert_eq!(
        diagnostics[0].range.end,
        Position { line: 0, column: offset + span.len() as u32 }
    );
}

#[test]
fn malformed_document_reports_parse_errors_and_skips_validation() {
    let text = r#"{"name": "wf1", "nodes": [}"#;
    let diagnostics = run_validation_pass(text, Some(&node_schema()));

    assert!(!diagnostics.is_empty());
    assert!(
        diagnostics
            .iter()
            .all(|d| d.message.starts_with("JSON Parsing Error: "))
    );
    assert!(
        diagnostics
            .iter()
            .all(|d| !d.message.starts_with("Validation Error"))
    );
    // At least one finding sits at the malformed token.
    let brace = text.rfind('}').unwrap() as u32;
    assert!(
        diagnostics
            .iter()
            .any(|d| d.range.start == Position { line: 0, column: brace })
    );
}

#[test]
fn no_schema_produces_zero_diagnostics_for_any_input() {
    for text in ["{broken", "", r#"{"name": 1}"#, "[1, 2,"] {
        assert!(run_validation_pass(text, None).is_empty());
    }
}

#[test]
fn valid_document_produces_empty_set() {
    let text = r#"{"name": "wf1", "nodes": [{"name": "A", "type": "http"}]}"#;
    assert!(run_validation_pass(text, Some(&node_schema())).is_empty());
}

#[test]
fn repeated_passes_yield_identical_diagnostics() {
    let text = r#"{"nodes": [{"name": 3}, "x"]}"#;
    let schema = node_schema();
    let first = run_validation_pass(text, Some(&schema));
    let second = run_validation_pass(text, Some(&schema));
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn multiline_document_positions_are_line_accurate() {
    let text = "{\n  \"name\": \"wf1\",\n  \"nodes\": [\n    {\"name\": \"A\", \"type\": 7}\n  ]\n}";
    let diagnostics = run_validation_pass(text, Some(&node_schema()));
    assert_eq!(diagnostics.len(), 1);
    let range = diagnostics[0].range;
    assert_eq!(range.start.line, 3);
    assert_eq!(range.end.line, 3);
    assert!(range.start.column < range.end.column);
}

#[test]
fn open_and_save_events_validate_and_replace() {
    let mut validator = WorkflowValidator::new(FlowSchemaConfig::default());
    validator
        .load_schema(&embedded::default_schema_definition())
        .unwrap();

    let bad = r#"{"name": "wf1", "nodes": [{"name": "A"}]}"#.to_string();
    let opened = validator
        .handle_event(WorkspaceEvent::DocumentOpened {
            name: "wf.json".into(),
            text: bad,
        })
        .expect("document events return diagnostics");
    assert_eq!(opened.len(), 1);

    let good = r#"{"name": "wf1", "nodes": [{"name": "A", "type": "http"}]}"#.to_string();
    let saved = validator
        .handle_event(WorkspaceEvent::DocumentSaved {
            name: "wf.json".into(),
            text: good,
        })
        .expect("document events return diagnostics");
    assert!(saved.is_empty());
    assert!(validator.diagnostics().get("wf.json").is_empty());
}

#[test]
fn documents_keep_independent_diagnostic_sets() {
    let mut validator = WorkflowValidator::new(FlowSchemaConfig::default());
    validator
        .load_schema(&embedded::default_schema_definition())
        .unwrap();

    validator.validate_document("a.json", r#"{"name": "a", "nodes": []}"#);
    validator.validate_document("b.json", r#"{"name": 5, "nodes": []}"#);

    assert!(validator.diagnostics().get("a.json").is_empty());
    assert_eq!(validator.diagnostics().get("b.json").len(), 1);
}
