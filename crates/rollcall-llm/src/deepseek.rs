//! Deepseek Provider Implementation
//!
//! Talks to Deepseek's OpenAI-compatible chat completions API. Any endpoint
//! speaking the same protocol can be targeted through [`ProviderConfig`].
//!
//! # Features
//!
//! - Async HTTP communication with bearer-token authentication
//! - Configurable endpoint, model and temperature
//! - Request timeout reported as [`LlmError::Timeout`]
//!
//! No retries happen here; a failed request is returned to the caller as-is.
//!
//! # Examples
//!
//! ```no_run
//! use rollcall_llm::{DeepseekProvider, ProviderConfig};
//!
//! let provider = DeepseekProvider::new(ProviderConfig::default(), "sk-...").unwrap();
//! ```

use crate::config::ProviderConfig;
use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::LlmError;
use rollcall_domain::traits::{LlmProvider as LlmProviderTrait, Prompt};
use tracing::debug;

/// Chat completions provider for Deepseek and compatible APIs
pub struct DeepseekProvider {
    config: ProviderConfig,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for DeepseekProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepseekProvider")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl DeepseekProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the API key is blank or the
    /// configuration is invalid, and [`LlmError::Communication`] if the HTTP
    /// client cannot be built.
    pub fn new(config: ProviderConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }
        config.validate().map_err(LlmError::Config)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Provider configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Send one chat completion request and return the assistant message
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The request cannot be sent or times out
    /// - The service answers with a non-success status
    /// - The response envelope has no message content
    pub async fn chat(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.config.temperature,
            stream: false,
        };

        debug!(
            "POST {} model={} user_chars={}",
            self.config.endpoint,
            self.config.model,
            prompt.user.len()
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(format!("no response within {}s", self.config.timeout_secs))
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(self.status_error(status.as_u16(), &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
    }

    fn status_error(&self, status: u16, body: &str) -> LlmError {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            429 => LlmError::RateLimitExceeded(message),
            404 => LlmError::ModelNotAvailable(self.config.model.clone()),
            status => LlmError::Http { status, message },
        }
    }
}

impl LlmProviderTrait for DeepseekProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, Self::Error> {
        self.chat(prompt).await
    }
}
