//! Error types for datebook.

use thiserror::Error;

/// Errors that can occur in datebook operations.
#[derive(Error, Debug)]
pub enum DatebookError {
    /// The caller supplied missing or malformed input.
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),
}

impl DatebookError {
    /// True when the error is the caller's fault rather than a downstream failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, DatebookError::Validation(_))
    }
}

/// Result type alias for datebook operations.
pub type DatebookResult<T> = Result<T, DatebookError>;
