use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowSchemaError {
    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Load error: {message}")]
    Load { message: String },

    #[error("Upload error: {message}")]
    Upload { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FlowSchemaError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlowSchemaError>;
