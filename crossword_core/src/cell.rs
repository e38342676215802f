//! Cell, position and direction types

use serde::{Deserialize, Serialize};

/// Entry direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The other axis
    pub fn flip(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    pub fn is_down(self) -> bool {
        self == Direction::Down
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Across => "Across",
            Direction::Down => "Down",
        }
    }
}

/// Grid coordinate, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Position `offset` cells further along `direction`
    pub fn advance(self, direction: Direction, offset: usize) -> Self {
        match direction {
            Direction::Across => Self::new(self.x + offset, self.y),
            Direction::Down => Self::new(self.x, self.y + offset),
        }
    }

    /// Apply a signed delta, returning `None` when the result leaves a
    /// `size` x `size` grid
    pub fn offset(self, dx: isize, dy: isize, size: usize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < size && y < size).then_some(Self::new(x, y))
    }
}

/// A single grid square
///
/// `light` is fixed when the grid is built (only an editable grid may toggle
/// it). `head` and `number` are derived by numbering; `letter` is whatever
/// has been entered and `answer` the known-correct letter, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) light: bool,
    pub(crate) head: bool,
    pub(crate) number: Option<u32>,
    pub(crate) letter: Option<char>,
    pub(crate) answer: Option<char>,
}

impl Cell {
    pub fn light() -> Self {
        Self {
            light: true,
            ..Self::default()
        }
    }

    pub fn block() -> Self {
        Self::default()
    }

    pub fn is_light(&self) -> bool {
        self.light
    }

    pub fn is_block(&self) -> bool {
        !self.light
    }

    pub fn is_head(&self) -> bool {
        self.head
    }

    /// Clue number, present on head cells only
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    pub fn answer(&self) -> Option<char> {
        self.answer
    }

    pub fn is_filled(&self) -> bool {
        self.letter.is_some()
    }
}

/// Uppercase a typed character, keeping the first char of multi-char mappings
pub(crate) fn normalize_letter(ch: char) -> char {
    ch.to_uppercase().next().unwrap_or(ch)
}
