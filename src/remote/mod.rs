//! Remote collaborators: schema loading and workflow upload.
//!
//! Everything network-shaped lives here, outside the validation core. The
//! core only ever sees a schema definition as data; these clients are how
//! that data (and uploads) move between the host and the workflow server.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::core::FlowSchemaConfig;
use crate::error::{FlowSchemaError, Result};

/// Path of the workflow collection endpoint, relative to the server base.
pub const WORKFLOW_ENDPOINT: &str = "rest/workflows";

/// Header carrying the API key on upload requests.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Anything that can produce a schema definition as data.
///
/// The definition's shape is deliberately untyped here; interpretation (and
/// rejection) happens in [`crate::types::WorkflowSchema::interpret`].
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn fetch(&self) -> Result<JsonValue>;
}

/// Fetches the schema definition from a configured URL.
#[derive(Debug, Clone)]
pub struct HttpSchemaSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpSchemaSource {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SchemaSource for HttpSchemaSource {
    async fn fetch(&self) -> Result<JsonValue> {
        let response = self.client.get(self.url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(FlowSchemaError::load(format!(
                "failed to load workflow schema from {}: {}",
                self.url,
                response.status()
            )));
        }
        let definition = response.json().await?;
        tracing::info!(url = %self.url, "workflow schema definition fetched");
        Ok(definition)
    }
}

/// Server response for a successful upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadOutcome {
    /// Identifier the server assigned to the workflow, when it reports one.
    #[serde(default)]
    pub id: Option<JsonValue>,
}

/// Client for pushing workflow documents to the server.
#[derive(Debug, Clone)]
pub struct WorkflowClient {
    server_url: Url,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl WorkflowClient {
    pub fn new(server_url: Url, api_key: Option<String>) -> Self {
        Self {
            server_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from configuration; the server URL is mandatory.
    pub fn from_config(config: &FlowSchemaConfig) -> Result<Self> {
        let server_url = config
            .server_url
            .clone()
            .ok_or_else(|| FlowSchemaError::config("server URL is not configured"))?;
        Ok(Self::new(server_url, config.api_key.clone()))
    }

    /// Absolute URL of the workflow collection endpoint.
    pub fn workflow_endpoint(&self) -> Result<Url> {
        // Url::join drops the last path segment without a trailing slash;
        // normalize so `http://host/base` and `http://host/base/` agree.
        let mut base = self.server_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(base.join(WORKFLOW_ENDPOINT)?)
    }

    /// Upload one workflow document, sent verbatim as the request body.
    ///
    /// A non-success status is an [`FlowSchemaError::Upload`] carrying the
    /// status and whatever body text the server returned.
    pub async fn upload(&self, content: &str) -> Result<UploadOutcome> {
        let url = self.workflow_endpoint()?;
        let mut request = self
            .client
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(content.to_string());
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlowSchemaError::upload(format!(
                "HTTP status {status}: {body}"
            )));
        }

        let outcome: UploadOutcome = response.json().await?;
        tracing::info!(url = %url, id = ?outcome.id, "workflow uploaded");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_and_without_trailing_slash() {
        let with = WorkflowClient::new(Url::parse("http://localhost:5678/").unwrap(), None);
        let without = WorkflowClient::new(Url::parse("http://localhost:5678").unwrap(), None);
        assert_eq!(
            with.workflow_endpoint().unwrap().as_str(),
            "http://localhost:5678/rest/workflows"
        );
        assert_eq!(
            without.workflow_endpoint().unwrap(),
            with.workflow_endpoint().unwrap()
        );

        let nested = WorkflowClient::new(Url::parse("http://host/automation").unwrap(), None);
        assert_eq!(
            nested.workflow_endpoint().unwrap().as_str(),
            "http://host/automation/rest/workflows"
        );
    }

    #[test]
    fn from_config_requires_server_url() {
        let err = WorkflowClient::from_config(&FlowSchemaConfig::default()).unwrap_err();
        assert!(matches!(err, FlowSchemaError::Config { .. }));

        let config = FlowSchemaConfig::default()
            .with_server_url(Url::parse("http://localhost:5678").unwrap())
            .with_api_key("key");
        assert!(WorkflowClient::from_config(&config).is_ok());
    }

    #[test]
    fn upload_outcome_tolerates_missing_id() {
        let outcome: UploadOutcome = serde_json::from_str("{}").unwrap();
        assert!(outcome.id.is_none());
        let outcome: UploadOutcome = serde_json::from_str(r#"{"id": "w1"}"#).unwrap();
        assert_eq!(outcome.id, Some(serde_json::json!("w1")));
    }
}
