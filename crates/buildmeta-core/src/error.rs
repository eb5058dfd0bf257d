//! Error types for context resolution.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("invalid context source: {0}")]
    InvalidSource(String),

    #[error("missing data: {0}")]
    MissingData(String),

    #[error("invalid timestamp {value:?}: {message}")]
    InvalidTimestamp { value: String, message: String },

    #[error("git error: {0}")]
    Git(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ContextResult<T> = std::result::Result<T, ContextError>;
