//! Error types for rust-spflow
//!
//! The flow engine itself never fails: malformed SQL degrades to fewer steps.
//! These errors only cover the boundaries around it (files, JSON, globbing).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading input or writing flow output
#[derive(Error, Debug)]
pub enum SpFlowError {
    #[error("Failed to read SQL file: {path}")]
    SqlFileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read SQL from standard input")]
    StdinReadError {
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid flow request: {message}")]
    InvalidRequest {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize flow output")]
    SerializeError {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid file pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to walk directory: {path}")]
    DirectoryWalkError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl From<serde_json::Error> for SpFlowError {
    fn from(err: serde_json::Error) -> Self {
        SpFlowError::SerializeError { source: err }
    }
}
