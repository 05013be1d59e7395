use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the validator and its remote collaborators.
///
/// All of it can come from host configuration storage; a change is delivered
/// to the core as a [`crate::core::WorkspaceEvent::ConfigurationChanged`]
/// event, never read back mid-pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSchemaConfig {
    /// Base URL of the workflow server, used for uploads.
    pub server_url: Option<Url>,
    /// URL the workflow schema definition is fetched from. Absent means
    /// validation stays disabled until a definition is supplied directly.
    pub workflow_schema_url: Option<Url>,
    /// API key sent with upload requests.
    pub api_key: Option<String>,
    /// Master switch; `false` behaves exactly like having no schema loaded.
    pub enable_validation: bool,
}

impl Default for FlowSchemaConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            workflow_schema_url: None,
            api_key: None,
            enable_validation: true,
        }
    }
}

impl FlowSchemaConfig {
    pub fn with_server_url(mut self, url: Url) -> Self {
        self.server_url = Some(url);
        self
    }

    pub fn with_workflow_schema_url(mut self, url: Url) -> Self {
        self.workflow_schema_url = Some(url);
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.enable_validation = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_validation_without_urls() {
        let config = FlowSchemaConfig::default();
        assert!(config.enable_validation);
        assert!(config.server_url.is_none());
        assert!(config.workflow_schema_url.is_none());
    }

    #[test]
    fn builder_chain() {
        let config = FlowSchemaConfig::default()
            .with_server_url(Url::parse("http://localhost:5678").unwrap())
            .with_api_key("secret")
            .with_validation(false);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert!(!config.enable_validation);
    }

    #[test]
    fn deserializes_from_json() {
        let config: FlowSchemaConfig = serde_json::from_str(
            r#"{
                "server_url": "http://localhost:5678/",
                "workflow_schema_url": "http://localhost:5678/schema.json",
                "api_key": null,
                "enable_validation": true
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.workflow_schema_url.unwrap().as_str(),
            "http://localhost:5678/schema.json"
        );
    }
}
