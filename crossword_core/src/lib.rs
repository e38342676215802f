//! # Crossword Core
//!
//! Headless state machine behind an interactive crossword grid.
//!
//! ## Philosophy
//!
//! - **Pure data**: Cells live in a coordinate-indexed array, never in a view tree
//! - **Deterministic**: Same event trace => same grid state
//! - **Synchronous**: Every operation completes before returning
//! - **Mechanism over policy**: The core decides which cells are active and what
//!   letters they hold; hosts decide how to draw them and where to save them
//!
//! ## Design
//!
//! The core provides:
//! - Grid: cells, numbering, the active entry and letter editing
//! - ActiveEntry: the run of cells currently receiving input
//! - Compact letter strings for saving progress
//! - ipuz documents and clue lists for interchange
//! - GridSnapshot: deterministic state for parity testing

pub mod cell;
pub mod change;
pub mod clues;
mod editing;
pub mod entry;
pub mod error;
pub mod grid;
pub mod ipuz;
pub mod letters;
mod navigation;
pub mod snapshot;

pub use cell::{Cell, Direction, Position};
pub use change::ChangeKind;
pub use clues::{
    blank_clues, clues_from_ipuz, enumeration, renumber_clues, word_length, Clue, ClueData,
    CluePosition,
};
pub use entry::ActiveEntry;
pub use error::{GridError, GridResult};
pub use grid::{Grid, GridOptions};
pub use ipuz::{Dimensions, Ipuz, IpuzCell, IpuzClue, IpuzClues};
pub use letters::{is_blank, EMPTY_CELL, EMPTY_LETTERS};
pub use snapshot::{CellSnapshot, GridSnapshot};
