//! OpenRouter (OpenAI-compatible) chat-completions provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use research::{ChatMessage, LlmError, LlmProvider, ModelId, ModelResponse};
use tracing::{debug, instrument, warn};

use crate::wire::{ChatCompletionRequest, ChatCompletionResponse};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Connection settings for [`OpenRouterProvider`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL without the trailing `/chat/completions`.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Deadline applied to every request, connect through body.
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Reads the API key from the environment variable `api_key_env`.
    pub fn from_env(
        base_url: impl Into<String>,
        api_key_env: &str,
        request_timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = std::env::var(api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingCredentials {
                message: format!("environment variable '{api_key_env}' is not set"),
            })?;
        Ok(Self {
            base_url: base_url.into(),
            api_key,
            request_timeout,
        })
    }
}

/// Sends chat-completion requests to an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    request_timeout: Duration,
}

impl OpenRouterProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LlmError::Transport {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            request_timeout: config.request_timeout,
        })
    }

    fn map_send_error(&self, error: reqwest::Error) -> LlmError {
        if error.is_timeout() {
            LlmError::Timeout {
                after: self.request_timeout,
            }
        } else {
            LlmError::Transport {
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    #[instrument(skip(self, messages), fields(model = %model, messages = messages.len()))]
    async fn complete(
        &self,
        model: &ModelId,
        messages: &[ChatMessage],
    ) -> Result<ModelResponse, LlmError> {
        let body = ChatCompletionRequest {
            model: model.as_str(),
            messages,
        };

        debug!(endpoint = %self.endpoint, "Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Chat completion request failed");
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::MalformedResponse {
                message: format!("invalid JSON: {e}"),
            })?;

        parsed
            .into_model_response()
            .ok_or_else(|| LlmError::MalformedResponse {
                message: "no choices in response".to_string(),
            })
    }
}
