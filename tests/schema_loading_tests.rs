use std::io::Write;

use flowschema::{FlowSchemaConfig, WorkflowSchema, WorkflowValidator};
use serde_json::json;

#[test]
fn schema_definition_loads_from_a_file_on_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let definition = json!({
        "required": ["name"],
        "fields": { "name": { "type": "string" } }
    });
    write!(file, "{definition}").unwrap();

    let raw = std::fs::read_to_string(file.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let schema = WorkflowSchema::interpret(&parsed).unwrap();
    assert!(schema.fields.contains_key("name"));
}

#[cfg(feature = "remote")]
mod sources {
    use async_trait::async_trait;
    use flowschema::{FlowSchemaConfig, Result, SchemaSource, WorkflowValidator};
    use serde_json::{Value as JsonValue, json};

    /// Stands in for the HTTP source; the validator only ever sees data.
    struct FixedSource(JsonValue);

    #[async_trait]
    impl SchemaSource for FixedSource {
        async fn fetch(&self) -> Result<JsonValue> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn fetched_definition_feeds_the_validator() {
        let source = FixedSource(json!({
            "required": ["name"],
            "fields": { "name": { "type": "string" } }
        }));

        let definition = source.fetch().await.unwrap();
        let mut validator = WorkflowValidator::new(FlowSchemaConfig::default());
        validator.load_schema(&definition).unwrap();

        assert!(
            validator
                .validate_document("wf.json", r#"{"name": "wf1"}"#)
                .is_empty()
        );
        assert_eq!(validator.validate_document("wf.json", r#"{}"#).len(), 1);
    }
}

#[test]
fn uninterpretable_file_disables_validation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"not-a-schema": true}}"#).unwrap();

    let raw = std::fs::read_to_string(file.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let mut validator = WorkflowValidator::new(FlowSchemaConfig::default());
    assert!(validator.load_schema(&parsed).is_err());
    assert!(validator.schema().is_none());
    assert!(
        validator
            .validate_document("wf.json", r#"{"anything": "goes"}"#)
            .is_empty()
    );
}
