//! Error types for completion and the ingestion pipeline

use crate::types::FileFailure;
use rollcall_llm::LlmError;
use rollcall_reader::ReaderError;
use thiserror::Error;

/// Errors from a single completion request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The remote service failed (network, auth, rate limit, timeout)
    #[error("Service error{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Service {
        /// HTTP-like status code, if the service returned one
        status: Option<u16>,
        /// Failure description
        message: String,
    },

    /// The response did not contain a usable JSON array
    #[error("Parse error: {message}")]
    Parse {
        /// What was wrong with the response
        message: String,
        /// The full response text, for diagnostics
        raw: String,
    },
}

impl CompletionError {
    /// Whether a retry of the identical request could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, CompletionError::Service { .. })
    }
}

impl From<LlmError> for CompletionError {
    fn from(e: LlmError) -> Self {
        CompletionError::Service {
            status: e.status(),
            message: e.to_string(),
        }
    }
}

/// Errors that can occur during ingestion
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// File extension is not a supported document format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The document could not be read or decoded
    #[error("{0}")]
    Extraction(ReaderError),

    /// Extracted text exceeds the configured maximum
    #[error("Text too long: {chars} chars (max: {max})")]
    TextTooLong {
        /// Length of the extracted text
        chars: usize,
        /// Configured maximum
        max: usize,
    },

    /// The completion service failed after all retries
    #[error("Service error{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Service {
        /// HTTP-like status code, if any
        status: Option<u16>,
        /// Failure description
        message: String,
    },

    /// The completion response could not be parsed
    #[error("Parse error: {message}")]
    Parse {
        /// What was wrong with the response
        message: String,
        /// The full response text
        raw: String,
    },

    /// The merged table could not be written
    #[error("Failed to persist table: {0}")]
    Persist(String),

    /// None of the given paths named a readable, supported file
    #[error("No input files could be resolved ({} given)", .failures.len())]
    NoInputs {
        /// Why each path was rejected
        failures: Vec<FileFailure>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractorError::UnsupportedFormat(_) => "unsupported_format",
            ExtractorError::Extraction(_) => "extraction",
            ExtractorError::TextTooLong { .. } => "text_too_long",
            ExtractorError::Service { .. } => "service",
            ExtractorError::Parse { .. } => "parse",
            ExtractorError::Persist(_) => "persist",
            ExtractorError::NoInputs { .. } => "no_inputs",
            ExtractorError::Config(_) => "config",
        }
    }

    /// Whether this error means the path never named a usable input
    pub(crate) fn is_unresolved_input(&self) -> bool {
        matches!(
            self,
            ExtractorError::UnsupportedFormat(_) | ExtractorError::Extraction(ReaderError::NotFound(_))
        )
    }
}

impl From<ReaderError> for ExtractorError {
    fn from(e: ReaderError) -> Self {
        match e {
            ReaderError::UnsupportedFormat(tag) => ExtractorError::UnsupportedFormat(tag),
            other => ExtractorError::Extraction(other),
        }
    }
}

impl From<CompletionError> for ExtractorError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Service { status, message } => ExtractorError::Service { status, message },
            CompletionError::Parse { message, raw } => ExtractorError::Parse { message, raw },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_llm_error_keeps_status() {
        let err: CompletionError = LlmError::RateLimitExceeded("slow down".to_string()).into();
        assert_eq!(
            err,
            CompletionError::Service {
                status: Some(429),
                message: "Rate limit exceeded: slow down".to_string(),
            }
        );
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Service error (HTTP 429): Rate limit exceeded: slow down");
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err: CompletionError = LlmError::Communication("connection reset".to_string()).into();
        assert!(matches!(err, CompletionError::Service { status: None, .. }));
        assert!(err.to_string().starts_with("Service error: "));
    }

    #[test]
    fn test_reader_error_mapping() {
        let unsupported: ExtractorError = ReaderError::UnsupportedFormat("exe".to_string()).into();
        assert_eq!(unsupported.kind(), "unsupported_format");
        assert!(unsupported.is_unresolved_input());

        let missing: ExtractorError = ReaderError::NotFound(PathBuf::from("gone.txt")).into();
        assert_eq!(missing.kind(), "extraction");
        assert!(missing.is_unresolved_input());

        let corrupt: ExtractorError = ReaderError::Extraction {
            path: PathBuf::from("bad.pdf"),
            reason: "truncated".to_string(),
        }
        .into();
        assert!(!corrupt.is_unresolved_input());
    }

    #[test]
    fn test_parse_error_is_not_retryable() {
        let err = CompletionError::Parse {
            message: "no array".to_string(),
            raw: "hello".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(matches!(ExtractorError::from(err), ExtractorError::Parse { raw, .. } if raw == "hello"));
    }
}
