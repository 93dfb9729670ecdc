//! Model client abstraction and its error taxonomy.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Anything that can turn a prompt into a response.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a single prompt and return the full response text.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    /// Identifier of the model answering the prompts.
    fn model(&self) -> &str;
}

/// Errors from a model client.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model server not reachable at {0}")]
    Connection(String),
    #[error("request rejected by model server: {0}")]
    InvalidRequest(String),
    #[error("invalid generation parameters: {0}")]
    InvalidConfig(String),
    #[error("model server error: {0}")]
    Api(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-facing classification of a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The local inference endpoint could not be reached.
    Connectivity,
    /// The model rejected the request or its parameters.
    InvalidInput,
    /// Anything else.
    Unexpected,
}

impl ModelError {
    /// Classify this error for display.
    pub fn kind(&self) -> FailureKind {
        match self {
            ModelError::Connection(_) => FailureKind::Connectivity,
            ModelError::InvalidRequest(_) | ModelError::InvalidConfig(_) => {
                FailureKind::InvalidInput
            }
            ModelError::Api(_) | ModelError::Http(_) | ModelError::Json(_) => {
                FailureKind::Unexpected
            }
        }
    }
}
