//! Rollcall LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `rollcall-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `DeepseekProvider`: Deepseek (OpenAI-compatible) chat completions API
//!
//! Providers never retry. Retry and timeout policy belongs to the caller.
//!
//! # Examples
//!
//! ```
//! use rollcall_llm::MockProvider;
//! use rollcall_domain::traits::{LlmProvider, Prompt};
//!
//! let provider = MockProvider::new("[]");
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let result = rt.block_on(provider.generate(&Prompt::new("system", "user"))).unwrap();
//! assert_eq!(result, "[]");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod deepseek;
mod types;

use rollcall_domain::traits::{LlmProvider as LlmProviderTrait, Prompt};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use config::ProviderConfig;
pub use deepseek::DeepseekProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or transport failure before a response arrived
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-success HTTP status from the service
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response body did not have the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing credentials or bad configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LlmError {
    /// HTTP-like status code for this error, if one applies
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Http { status, .. } => Some(*status),
            LlmError::RateLimitExceeded(_) => Some(429),
            LlmError::ModelNotAvailable(_) => Some(404),
            LlmError::Timeout(_) => Some(408),
            LlmError::Communication(_) | LlmError::InvalidResponse(_) | LlmError::Config(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(u16),
}

#[derive(Debug, Default)]
struct MockState {
    responses: Vec<(String, Reply)>,
    pending_failures: Vec<u16>,
    prompts: Vec<Prompt>,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// A response registered with [`MockProvider::add_response`] is returned for
/// any prompt whose user message contains the registered key; keys are
/// checked in registration order.
///
/// # Examples
///
/// ```
/// use rollcall_llm::MockProvider;
/// use rollcall_domain::traits::{LlmProvider, Prompt};
///
/// let mut provider = MockProvider::default();
/// provider.add_response("Alice", r#"[{"name":"Alice","interests":[]}]"#);
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let reply = rt.block_on(provider.generate(&Prompt::new("sys", "notes about Alice"))).unwrap();
/// assert!(reply.contains("Alice"));
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock".to_string(),
            delay: None,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Delay every reply, to exercise caller timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Return `response` for prompts whose user message contains `key`
    pub fn add_response(&mut self, key: impl Into<String>, response: impl Into<String>) {
        self.lock().responses.push((key.into(), Reply::Text(response.into())));
    }

    /// Fail prompts whose user message contains `key` with an HTTP status
    pub fn add_error(&mut self, key: impl Into<String>, status: u16) {
        self.lock().responses.push((key.into(), Reply::Fail(status)));
    }

    /// Fail the next call with `status`, regardless of prompt
    ///
    /// Queued failures are consumed first-in first-out before any
    /// registered response is considered.
    pub fn fail_next(&self, status: u16) {
        self.lock().pending_failures.push(status);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.lock().prompts.len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<Prompt> {
        self.lock().prompts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reply_for(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let mut state = self.lock();
        state.prompts.push(prompt.clone());

        if !state.pending_failures.is_empty() {
            let status = state.pending_failures.remove(0);
            return Err(mock_failure(status));
        }

        let reply = state
            .responses
            .iter()
            .find(|(key, _)| prompt.user.contains(key.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(status)) => Err(mock_failure(status)),
            None => Ok(self.default_response.clone()),
        }
    }
}

fn mock_failure(status: u16) -> LlmError {
    match status {
        429 => LlmError::RateLimitExceeded("Mock rate limit".to_string()),
        status => LlmError::Http {
            status,
            message: "Mock error".to_string(),
        },
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, Self::Error> {
        let reply = self.reply_for(prompt);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}
