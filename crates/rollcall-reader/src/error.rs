//! Error types for text extraction

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while extracting text from a document
#[derive(Error, Debug)]
pub enum ReaderError {
    /// Format tag or file extension is not one we can read
    #[error("Unsupported format: '{0}' (expected one of: docx, pdf, pages, txt)")]
    UnsupportedFormat(String),

    /// Input file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O failure while reading the input
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The container or document could not be decoded
    #[error("Failed to extract text from {}: {reason}", .path.display())]
    Extraction {
        /// File being read
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
}

impl ReaderError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ReaderError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn extraction(path: &Path, reason: impl Into<String>) -> Self {
        ReaderError::Extraction {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Path of the file that failed, if the error concerns one
    pub fn path(&self) -> Option<&Path> {
        match self {
            ReaderError::UnsupportedFormat(_) => None,
            ReaderError::NotFound(path) => Some(path),
            ReaderError::Io { path, .. } | ReaderError::Extraction { path, .. } => Some(path),
        }
    }
}
