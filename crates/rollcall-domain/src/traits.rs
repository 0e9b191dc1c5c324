//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::table::merge_records;
use crate::{NormalizedRecord, TableRow, UpsertOutcome};
use chrono::{DateTime, Utc};
use std::future::Future;

/// A prompt for a chat-style completion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Fixed instruction sent as the system message
    pub system: String,

    /// Per-request content sent as the user message
    pub user: String,
}

impl Prompt {
    /// Create a new prompt
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (rollcall-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Name of the model answering requests
    fn model_name(&self) -> &str;

    /// Generate a text completion for the prompt
    fn generate(&self, prompt: &Prompt) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for loading and persisting the people table
///
/// Implemented by the infrastructure layer (rollcall-store)
pub trait TableStore {
    /// Error type for store operations
    type Error;

    /// Load all rows in stored order
    fn load(&self) -> Result<Vec<TableRow>, Self::Error>;

    /// Replace the persisted table with `rows`
    fn save(&self, rows: &[TableRow]) -> Result<(), Self::Error>;

    /// Load, upsert `records` at `now`, and save the result
    ///
    /// Implementations that can be shared between processes should override
    /// this to hold a lock across the whole read-modify-write.
    fn merge(&self, records: &[NormalizedRecord], now: DateTime<Utc>) -> Result<UpsertOutcome, Self::Error> {
        let existing = self.load()?;
        let outcome = merge_records(existing, records, now);
        self.save(&outcome.rows)?;
        Ok(outcome)
    }
}
