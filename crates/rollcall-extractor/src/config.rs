//! Configuration for the ingestion pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum time for a single completion call (seconds)
    pub completion_timeout_secs: u64,

    /// Extra attempts after a service failure (0 disables retrying)
    pub service_retries: u32,

    /// Delay before the first retry (milliseconds), doubled per attempt
    pub retry_backoff_ms: u64,

    /// Maximum extracted text length sent for completion (characters)
    pub max_text_length: usize,
}

impl PipelineConfig {
    /// Get the completion timeout as a Duration
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Delay before retry number `attempt` (zero-based)
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.completion_timeout_secs == 0 {
            return Err("completion_timeout_secs must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.service_retries > 10 {
            return Err("service_retries cannot exceed 10".to_string());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    /// Default configuration: one retry after a one-second pause
    fn default() -> Self {
        Self {
            completion_timeout_secs: 120,
            service_retries: 1,
            retry_backoff_ms: 1_000,
            max_text_length: 200_000,
        }
    }
}

impl PipelineConfig {
    /// Aggressive preset: fail fast, never retry
    pub fn aggressive() -> Self {
        Self {
            completion_timeout_secs: 60,
            service_retries: 0,
            retry_backoff_ms: 500,
            max_text_length: 100_000,
        }
    }

    /// Lenient preset: long timeouts, several retries, large documents
    pub fn lenient() -> Self {
        Self {
            completion_timeout_secs: 300,
            service_retries: 3,
            retry_backoff_ms: 2_000,
            max_text_length: 500_000,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
