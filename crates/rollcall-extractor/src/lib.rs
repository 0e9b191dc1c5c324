//! Rollcall Extractor
//!
//! Turns documents into people and their interests using an LLM, and merges
//! them into the people table.
//!
//! # Architecture
//!
//! ```text
//! file → Reader → text → Completer → PersonRecord → normalize → TableStore::merge
//! ```
//!
//! - [`CompletionClient`] sends the fixed extraction prompt through an
//!   `LlmProvider` and parses the JSON array out of the reply, tolerating
//!   code fences and surrounding prose.
//! - [`Pipeline`] drives a batch of files. Each file fails independently;
//!   all records are merged in one upsert at the end.
//!
//! # Example Usage
//!
//! ```no_run
//! use rollcall_extractor::{CompletionClient, Pipeline, PipelineConfig};
//! use rollcall_llm::MockProvider;
//! use rollcall_store::CsvTableStore;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CompletionClient::new(MockProvider::new("[]"));
//! let store = CsvTableStore::new("results.csv");
//! let pipeline = Pipeline::new(client, store, PipelineConfig::default())?;
//!
//! let report = pipeline.run(&[PathBuf::from("notes.txt")]).await?;
//!
//! println!("Failed: {} file(s)", report.failures.len());
//! println!("Table now holds {} row(s)", report.row_count);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod parser;
mod pipeline;
mod prompt;
mod types;


pub use client::{Completer, CompletionClient};
pub use config::PipelineConfig;
pub use error::{CompletionError, ExtractorError};
pub use parser::parse_completion;
pub use pipeline::Pipeline;
pub use prompt::{PromptBuilder, EXTRACTION_INSTRUCTIONS};
pub use types::{BatchReport, FileFailure, FileOutcome};
