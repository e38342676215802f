//! Active entry tracking

use serde::{Deserialize, Serialize};

use crate::cell::{Direction, Position};

/// The run of light cells currently receiving input
///
/// `anchor` is the first cell of the run and `target` the offset of the cell
/// that receives the next typed letter. A length of zero means nothing is
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveEntry {
    pub anchor: Position,
    pub direction: Direction,
    pub length: usize,
    pub target: usize,
}

impl ActiveEntry {
    pub const fn empty() -> Self {
        Self {
            anchor: Position::zero(),
            direction: Direction::Across,
            length: 0,
            target: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.length > 0
    }

    /// Cell receiving the next letter
    pub fn target_position(&self) -> Option<Position> {
        self.is_active()
            .then(|| self.anchor.advance(self.direction, self.target))
    }

    pub fn is_first(&self) -> bool {
        self.target == 0
    }

    pub fn is_last(&self) -> bool {
        self.target + 1 >= self.length
    }

    /// Cells of the entry in reading order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.length).map(move |offset| self.anchor.advance(self.direction, offset))
    }

    pub fn contains(&self, pos: Position) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.direction {
            Direction::Across => {
                pos.y == self.anchor.y
                    && pos.x >= self.anchor.x
                    && pos.x < self.anchor.x + self.length
            }
            Direction::Down => {
                pos.x == self.anchor.x
                    && pos.y >= self.anchor.y
                    && pos.y < self.anchor.y + self.length
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::empty();
    }
}

impl Default for ActiveEntry {
    fn default() -> Self {
        Self::empty()
    }
}
