//! Report types for a pipeline run

use crate::error::ExtractorError;
use serde::{Serialize, Serializer};
use std::fmt::Display;
use std::path::PathBuf;

/// Outcome of a whole batch
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// Number of input paths handled
    pub files_processed: usize,

    /// Files that produced records (possibly zero)
    pub outcomes: Vec<FileOutcome>,

    /// Files that failed, with the reason
    pub failures: Vec<FileFailure>,

    /// Normalized records passed to the upsert
    pub records_merged: usize,

    /// Names added to the table, in first-seen order
    pub inserted: Vec<String>,

    /// Existing names whose rows were refreshed
    pub updated: Vec<String>,

    /// Rows in the table after the upsert
    pub row_count: usize,
}

impl BatchReport {
    /// Number of files that completed without error
    pub fn files_succeeded(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether every file succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A file that was read and completed successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    /// Input path as given
    pub path: PathBuf,

    /// Normalized records the file contributed
    pub records: usize,
}

/// A file whose processing failed at some stage
#[derive(Debug, Serialize)]
pub struct FileFailure {
    /// Input path as given
    pub path: PathBuf,

    /// Why it failed
    #[serde(serialize_with = "serialize_display")]
    pub error: ExtractorError,
}

impl FileFailure {
    /// Create a failure record
    pub fn new(path: impl Into<PathBuf>, error: ExtractorError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
