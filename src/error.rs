// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractorError>;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Syllabus download failed: {0}")]
    Fetch(String),

    #[error("PDF parsing error: {0}")]
    Parse(String),

    #[error("PDF assembly failed: {0}")]
    Assembly(String),

    #[error("Download not found: {0}")]
    NotFound(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ExtractorError {
    /// Only network failures are worth retrying; everything else needs a new
    /// source document, new input or a code fix.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExtractorError::Fetch(_))
    }
}

impl From<reqwest::Error> for ExtractorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExtractorError::Fetch(format!("request timed out: {}", err))
        } else {
            ExtractorError::Fetch(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(err: serde_json::Error) -> Self {
        ExtractorError::Serialization(err.to_string())
    }
}
