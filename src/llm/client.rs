use super::types::GenerationRequest;
use crate::{Error, Result, config::LlmConfig};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Runs one generation and returns the model's raw JSON text.
    async fn generate_json(&self, request: GenerationRequest) -> Result<String>;
}

/// Client for OpenAI-compatible chat completion APIs.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(api_key.into());

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url.clone());
        }

        let client = Client::with_config(openai_config);

        Self {
            client,
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(
        &self,
        request: GenerationRequest,
    ) -> Result<openai_types::CreateChatCompletionRequest> {
        let system = openai_types::ChatCompletionRequestSystemMessageArgs::default()
            .content(openai_types::ChatCompletionRequestSystemMessageContent::Text(
                request.system_prompt,
            ))
            .build()?;
        let user = openai_types::ChatCompletionRequestUserMessageArgs::default()
            .content(openai_types::ChatCompletionRequestUserMessageContent::Text(
                request.user_prompt,
            ))
            .build()?;

        let response_format = openai_types::ResponseFormat::JsonSchema {
            json_schema: openai_types::ResponseFormatJsonSchema {
                description: None,
                name: request.schema_name,
                schema: Some(request.response_schema),
                strict: None,
            },
        };

        let messages: Vec<openai_types::ChatCompletionRequestMessage> =
            vec![system.into(), user.into()];

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.model)
            .messages(messages)
            .response_format(response_format);

        if let Some(temperature) = request.temperature {
            request_builder.temperature(temperature);
        }

        Ok(request_builder.build()?)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate_json(&self, request: GenerationRequest) -> Result<String> {
        debug!(
            "Creating chat completion with model {} for schema {}",
            self.model, request.schema_name
        );

        let openai_request = self.build_request(request)?;
        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::llm("Chat completion contained no content"))
    }
}
