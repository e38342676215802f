//! Compact letter strings
//!
//! Progress is saved as one character per light cell in row-major order,
//! with [`EMPTY_CELL`] standing for an empty cell. A grid without any
//! letters exports [`EMPTY_LETTERS`], which hosts treat as "nothing to save".

use crate::{
    cell::normalize_letter,
    error::{GridError, GridResult},
    grid::Grid,
};

/// Placeholder for an empty cell
pub const EMPTY_CELL: char = '.';

/// Export of a grid with no letters
pub const EMPTY_LETTERS: &str = "";

/// True if `letters` holds no letter at all
pub fn is_blank(letters: &str) -> bool {
    letters.chars().all(|ch| ch == EMPTY_CELL)
}

impl Grid {
    pub fn export_letters(&self) -> String {
        let letters: String = self
            .lights()
            .map(|pos| self.letter(pos).unwrap_or(EMPTY_CELL))
            .collect();

        if is_blank(&letters) {
            EMPTY_LETTERS.to_string()
        } else {
            letters
        }
    }

    /// Restore letters saved by [`Grid::export_letters`]
    ///
    /// Placeholders leave the cell as it is. An empty string is a no-op; any
    /// other string must hold exactly one character per light cell.
    pub fn import_letters(&mut self, letters: &str) -> GridResult<()> {
        if letters.is_empty() {
            return Ok(());
        }

        let expected = self.light_count();
        let found = letters.chars().count();
        if found != expected {
            return Err(GridError::LetterCountMismatch { expected, found });
        }

        let before = self.track();
        let lights: Vec<_> = self.lights().collect();
        for (pos, ch) in lights.into_iter().zip(letters.chars()) {
            if ch != EMPTY_CELL {
                self.write_letter(pos, Some(normalize_letter(ch)));
            }
        }
        self.publish(before);
        Ok(())
    }
}
