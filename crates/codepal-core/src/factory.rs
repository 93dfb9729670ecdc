//! Process-wide model client.

use once_cell::sync::OnceCell;
use tracing::info;

use crate::client::{ModelClient, ModelError};
use crate::config::AssistConfig;
use crate::ollama::OllamaClient;

static CLIENT: OnceCell<OllamaClient> = OnceCell::new();

/// Return the shared model client, building it on first use.
///
/// Every successful call returns the same instance. A failed construction is
/// not cached, so a later call tries again.
pub fn get_client() -> Result<&'static OllamaClient, ModelError> {
    CLIENT.get_or_try_init(|| {
        let config = AssistConfig::from_env();
        info!(
            "Initializing model client for '{}' at {}",
            config.model, config.base_url
        );
        let client = OllamaClient::new(&config)?;
        info!("Model client ready: {}", client.model());
        Ok(client)
    })
}
