//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key was supplied
    #[error("No API key: pass --api-key or set {}", rollcall_llm::config::API_KEY_ENV)]
    MissingApiKey,

    /// Completion provider could not be set up
    #[error("Provider error: {0}")]
    Llm(#[from] rollcall_llm::LlmError),

    /// Pipeline failed as a whole
    #[error("{0}")]
    Extractor(#[from] rollcall_extractor::ExtractorError),

    /// Table could not be read
    #[error("Store error: {0}")]
    Store(#[from] rollcall_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
