//! Error types for table persistence

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving the people table
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding or decoding failure
    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        /// Table file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },

    /// The advisory lock could not be taken
    #[error("Failed to lock {}: {source}", .path.display())]
    Lock {
        /// Lock file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a people table
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        StoreError::Csv {
            path: path.into(),
            source,
        }
    }
}
