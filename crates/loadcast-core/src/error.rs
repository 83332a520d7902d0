//! Unified error types for the loadcast pipeline
//!
//! This module provides a common error type [`LoadcastError`] that can
//! represent failures from any stage of the pipeline. Domain-specific errors
//! are converted to `LoadcastError` for uniform handling at API boundaries,
//! and the variants mirror the pipeline's failure taxonomy: every variant is
//! fatal to its run — recovery is rerun, since each run overwrites its output.

use thiserror::Error;

/// Unified error type for all loadcast operations.
///
/// Stage functions return `anyhow::Result` for context chaining; they
/// construct these variants at the failure site so callers can
/// `downcast_ref::<LoadcastError>()` and match on the category.
#[derive(Error, Debug)]
pub enum LoadcastError {
    /// Source table violates its structural contract (wrong column count,
    /// unparseable timestamp or value).
    #[error("schema error: {0}")]
    Schema(String),

    /// An expected column name was not found among the candidates.
    #[error("column lookup failed: {0}")]
    Lookup(String),

    /// Series too short for the requested window length.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A many-to-one join multiplied rows instead of preserving them.
    #[error("join cardinality violation: {0}")]
    JoinCardinality(String),

    /// I/O errors (file access, directory creation, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using LoadcastError.
pub type LoadcastResult<T> = Result<T, LoadcastError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for LoadcastError {
    fn from(err: anyhow::Error) -> Self {
        LoadcastError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for LoadcastError {
    fn from(s: String) -> Self {
        LoadcastError::Other(s)
    }
}

impl From<&str> for LoadcastError {
    fn from(s: &str) -> Self {
        LoadcastError::Other(s.to_string())
    }
}

// JSON parsing errors (scaler/artifact persistence)
impl From<serde_json::Error> for LoadcastError {
    fn from(err: serde_json::Error) -> Self {
        LoadcastError::Other(err.to_string())
    }
}
