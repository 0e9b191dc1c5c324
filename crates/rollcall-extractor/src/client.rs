//! Completion client: document text in, person records out

use crate::error::CompletionError;
use crate::parser::parse_completion;
use crate::prompt::PromptBuilder;
use rollcall_domain::traits::LlmProvider;
use rollcall_domain::PersonRecord;
use std::future::Future;
use tracing::debug;

/// Capability to turn document text into raw person records
///
/// The pipeline depends on this rather than on an LLM provider directly, so
/// tests can substitute a scripted stand-in.
pub trait Completer {
    /// Extract people and their interests from `text`
    ///
    /// Implementations do not retry; the caller owns retry policy.
    fn complete(&self, text: &str) -> impl Future<Output = Result<Vec<PersonRecord>, CompletionError>> + Send;
}

/// [`Completer`] backed by an LLM provider
///
/// Sends the fixed extraction instruction with the text, then parses the
/// JSON array out of the reply.
pub struct CompletionClient<L> {
    provider: L,
}

impl<L: LlmProvider> CompletionClient<L> {
    /// Create a client around `provider`
    pub fn new(provider: L) -> Self {
        Self { provider }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &L {
        &self.provider
    }
}

impl<L> Completer for CompletionClient<L>
where
    L: LlmProvider + Sync,
    CompletionError: From<L::Error>,
{
    async fn complete(&self, text: &str) -> Result<Vec<PersonRecord>, CompletionError> {
        let prompt = PromptBuilder::new(text).build();
        debug!(
            "Requesting completion from {} ({} chars)",
            self.provider.model_name(),
            prompt.user.len()
        );

        let response = self.provider.generate(&prompt).await?;
        debug!("Completion response length: {} chars", response.len());

        parse_completion(&response)
    }
}
