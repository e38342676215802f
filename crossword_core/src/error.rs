//! Grid errors
//!
//! Only load-time data can fail. Clicks and navigation outside the grid are
//! ignored rather than reported.

use thiserror::Error;

/// Grid error
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Grid has no cells")]
    EmptyGrid,

    #[error("Row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: usize, y: usize },

    #[error("Grid layout is not editable")]
    LayoutLocked,

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Letter string covers {found} cells, grid has {expected} lights")]
    LetterCountMismatch { expected: usize, found: usize },

    #[error("Cell ({x}, {y}) is a block in one matrix and light in the other")]
    InvalidCell { x: usize, y: usize },

    #[error("No clue numbered {0}")]
    UnknownClue(u32),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Grid result
pub type GridResult<T> = Result<T, GridError>;
