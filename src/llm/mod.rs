pub mod client;
pub mod gemini;
pub mod types;

pub use client::*;
pub use gemini::{GeminiClient, to_gemini_schema};
pub use types::*;

use crate::config::{LlmConfig, LlmProvider};
use std::sync::Arc;
use tracing::info;

/// Builds the configured provider's client, or `None` when no API key is set.
pub fn create_llm_client(config: &LlmConfig) -> Option<Arc<dyn LlmClient>> {
    let api_key = config.api_key()?;

    info!(
        "Using {:?} provider with model {}",
        config.provider, config.model
    );

    let client: Arc<dyn LlmClient> = match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(config, api_key)),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(config, api_key)),
    };
    Some(client)
}
