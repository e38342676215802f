//! Store errors

use crossword_core::GridError;
use thiserror::Error;

/// Store error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Unsupported store version: {0}")]
    UnsupportedVersion(u32),
}

/// Store result
pub type StoreResult<T> = Result<T, StoreError>;
