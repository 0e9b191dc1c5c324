//! Prompt for name and interest extraction

use rollcall_domain::traits::Prompt;

/// Builds the completion prompt for one document
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the prompt: fixed instruction as the system message, the
    /// document fenced in backticks as the user message
    pub fn build(&self) -> Prompt {
        let mut user = String::with_capacity(self.text.len() + 16);
        user.push_str("Text:\n```\n");
        user.push_str(self.text.trim_end());
        user.push_str("\n```");

        Prompt::new(EXTRACTION_INSTRUCTIONS, user)
    }
}

/// System instruction sent with every document
pub const EXTRACTION_INSTRUCTIONS: &str = r#"Extract *all* people's full names and their listed interests from the text the user provides.

Respond ONLY with a JSON array of objects, each having:
  - "name": string
  - "interests": array of strings

Example:
[{"name":"Alice","interests":["x","y"]}]

If the text mentions nobody, respond with []."#;
