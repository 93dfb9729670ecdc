//! Ollama API client for local LLM inference.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{ModelClient, ModelError};
use crate::config::{AssistConfig, GenerationParams};

/// Default Ollama server URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model identifier. The deployed model is chosen with `CODEPAL_MODEL`.
pub const DEFAULT_MODEL: &str = "local-llm";

/// Ollama API client.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    generation: GenerationParams,
}

/// Request to Ollama generate API.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions<'a>,
}

/// Ollama generation options.
#[derive(Debug, Serialize)]
struct GenerateOptions<'a> {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

/// Response from Ollama generate API.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Response from Ollama tags API (list models).
#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<TagsModel>,
}

#[derive(Debug, Deserialize)]
struct TagsModel {
    name: String,
}

impl OllamaClient {
    /// Create a client from configuration.
    ///
    /// Fails when the generation parameters are invalid or the HTTP client
    /// cannot be built. No request is made.
    pub fn new(config: &AssistConfig) -> Result<Self, ModelError> {
        config.generation.validate()?;

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            generation: config.generation.clone(),
        })
    }

    /// Check if Ollama server is running and model is available.
    pub async fn check_availability(&self) -> Result<(), ModelError> {
        let tags_url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&tags_url)
            .send()
            .await
            .map_err(|_| ModelError::Connection(self.base_url.clone()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(format!("{}: {}", status, error_message(text))));
        }

        let tags: TagsResponse = response.json().await?;

        if !model_listed(&self.model, tags.models.iter().map(|m| m.name.as_str())) {
            return Err(ModelError::InvalidRequest(format!(
                "model '{0}' not found. Pull it with: ollama pull {0}",
                self.model
            )));
        }

        Ok(())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the generation parameters.
    pub fn generation(&self) -> &GenerationParams {
        &self.generation
    }

    fn request<'a>(&'a self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.generation.temperature,
                top_p: self.generation.top_p,
                num_predict: self.generation.max_tokens,
                stop: self.generation.stop.as_deref(),
            },
        }
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let url = format!("{}/api/generate", self.base_url);
        debug!("POST {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .json(&self.request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ModelError::Connection(self.base_url.clone())
                } else {
                    ModelError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = error_message(text);

            // 400 is a malformed request, 404 an unknown model
            return Err(if status.is_client_error() {
                ModelError::InvalidRequest(format!("{}: {}", status, message))
            } else {
                ModelError::Api(format!("{}: {}", status, message))
            });
        }

        let response: GenerateResponse = response.json().await?;

        if let Some(error) = response.error {
            return Err(ModelError::InvalidRequest(error));
        }

        Ok(response.response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Pull the message out of an `{"error": ...}` body, or keep the raw text.
fn error_message(text: String) -> String {
    serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text)
}

/// Whether `model` appears among the installed tags, with or without a tag suffix.
fn model_listed<'a>(model: &str, installed: impl IntoIterator<Item = &'a str>) -> bool {
    let model_base = model.split(':').next().unwrap_or(model);
    let prefix = format!("{}:", model_base);

    installed
        .into_iter()
        .any(|name| name == model || name.starts_with(&prefix))
}
