//! Assistant configuration.

use crate::client::ModelError;
use crate::ollama::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus-sampling threshold
    pub top_p: f32,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Early-stop sequences (none by default)
    pub stop: Option<Vec<String>>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.95,
            max_tokens: 8192,
            stop: None,
        }
    }
}

impl GenerationParams {
    /// Reject parameter combinations the model server would refuse.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(ModelError::InvalidConfig(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            )));
        }

        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ModelError::InvalidConfig(format!(
                "top_p must be in (0, 1], got {}",
                self.top_p
            )));
        }

        if self.max_tokens == 0 {
            return Err(ModelError::InvalidConfig(
                "max_tokens must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration for the assistant.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// Ollama server URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Generation parameters
    pub generation: GenerationParams,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation: GenerationParams::default(),
        }
    }
}

impl AssistConfig {
    /// Create config from environment variables.
    ///
    /// Only the server location and the model identity can be overridden.
    /// Generation parameters stay fixed.
    pub fn from_env() -> Self {
        Self::from_overrides(
            std::env::var("CODEPAL_OLLAMA_URL").ok(),
            std::env::var("CODEPAL_MODEL").ok(),
        )
    }

    /// Apply server and model overrides; blank values fall back to the defaults.
    fn from_overrides(base_url: Option<String>, model: Option<String>) -> Self {
        let base_url = base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());

        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            base_url,
            model,
            ..Self::default()
        }
    }

    /// Create a builder for configuration.
    pub fn builder() -> AssistConfigBuilder {
        AssistConfigBuilder::default()
    }
}

/// Builder for assistant configuration.
#[derive(Debug, Default)]
pub struct AssistConfigBuilder {
    config: AssistConfig,
}

impl AssistConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.generation.temperature = temperature;
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.config.generation.top_p = top_p;
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.generation.max_tokens = tokens;
        self
    }

    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.config.generation.stop = Some(stop);
        self
    }

    pub fn build(self) -> AssistConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generation_params() {
        let params = GenerationParams::default();
        assert_eq!(params.temperature, 0.3);
        assert_eq!(params.top_p, 0.95);
        assert_eq!(params.max_tokens, 8192);
        assert!(params.stop.is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = AssistConfig::default();
        assert_eq!(config.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_overrides_applied() {
        let config = AssistConfig::from_overrides(
            Some("http://gpu-box:11434".to_string()),
            Some("codellama:7b".to_string()),
        );
        assert_eq!(config.base_url, "http://gpu-box:11434");
        assert_eq!(config.model, "codellama:7b");
        assert_eq!(config.generation, GenerationParams::default());
    }

    #[test]
    fn test_blank_overrides_use_defaults() {
        let config = AssistConfig::from_overrides(Some(String::new()), Some("  ".to_string()));
        assert_eq!(config.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.model, DEFAULT_MODEL);

        let unset = AssistConfig::from_overrides(None, None);
        assert_eq!(unset.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(unset.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AssistConfig::builder()
            .base_url("http://myserver:11434")
            .model("qwen2.5-coder:7b")
            .max_tokens(1024)
            .build();
        assert_eq!(config.base_url, "http://myserver:11434");
        assert_eq!(config.model, "qwen2.5-coder:7b");
        assert_eq!(config.generation.max_tokens, 1024);
        assert_eq!(config.generation.temperature, 0.3);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let bad_top_p = AssistConfig::builder().top_p(1.5).build();
        assert!(matches!(
            bad_top_p.generation.validate(),
            Err(ModelError::InvalidConfig(_))
        ));

        let bad_temp = AssistConfig::builder().temperature(-0.1).build();
        assert!(bad_temp.generation.validate().is_err());

        let bad_tokens = AssistConfig::builder().max_tokens(0).build();
        assert!(bad_tokens.generation.validate().is_err());

        let nan_temp = AssistConfig::builder().temperature(f32::NAN).build();
        assert!(nan_temp.generation.validate().is_err());
    }
}
