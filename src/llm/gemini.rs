use super::{LlmClient, types::*};
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Self {
        let base_url = if config.base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            config.base_url.trim_end_matches('/').to_string()
        };

        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
            model: config.model.clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Gemini's schema dialect spells type names in upper case.
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(name)) => Value::String(name.to_uppercase()),
                        _ => to_gemini_schema(value),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_json(&self, request: GenerationRequest) -> Result<String> {
        debug!(
            "Calling Gemini model {} for schema {}",
            self.model, request.schema_name
        );

        let body = GeminiRequest {
            system_instruction: GeminiContent::text(None, request.system_prompt),
            contents: vec![GeminiContent::text(Some("user"), request.user_prompt)],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: to_gemini_schema(&request.response_schema),
                temperature: request.temperature,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned {}: {}", status, body);
            return Err(Error::llm(format!(
                "Gemini API returned {}: {}",
                status,
                body.trim()
            )));
        }

        let parsed: GeminiResponse = response.json().await?;
        match parsed.first_text() {
            Some(text) => {
                debug!("Received {} bytes from Gemini", text.len());
                Ok(text.to_string())
            }
            None => {
                let reason = parsed
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
                    .or_else(|| parsed.prompt_feedback.as_ref().map(|f| f.to_string()))
                    .unwrap_or_else(|| "no candidates".to_string());
                Err(Error::llm(format!(
                    "Gemini response contained no text ({})",
                    reason
                )))
            }
        }
    }
}
