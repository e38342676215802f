//! Letter editing, checking and revealing

use core::cmp::Ordering;

use crate::{
    cell::{normalize_letter, Direction, Position},
    error::{GridError, GridResult},
    grid::Grid,
    letters::EMPTY_CELL,
};

impl Grid {
    /// Write a typed character into the target cell and advance the cursor
    ///
    /// The placeholder character clears the cell instead. The cursor stays
    /// put on the last cell of the entry.
    pub fn set_target_letter(&mut self, ch: char) {
        let before = self.track();
        self.put_letter(ch);
        self.publish(before);
    }

    /// Remove the letter under the cursor
    ///
    /// With `backpedal`, an empty target that is not the first cell of the
    /// entry makes the cursor step back first, so repeated calls erase the
    /// entry right to left. A filled target is always cleared in place.
    pub fn clear_target_letter(&mut self, backpedal: bool) {
        let before = self.track();
        self.take_letter(backpedal);
        self.publish(before);
    }

    /// Delete key (`backpedal == false`) or hardware backspace
    pub fn delete_letter(&mut self, backpedal: bool) {
        self.clear_target_letter(backpedal);
    }

    /// Apply the difference between two snapshots of the keystroke buffer
    ///
    /// Appended characters are typed, removed characters are backspaced and a
    /// same-length change retypes everything from the first difference.
    pub fn update_letters(&mut self, prev: &str, new: &str) {
        if !self.is_active() {
            return;
        }

        let prev: Vec<char> = prev.chars().collect();
        let new: Vec<char> = new.chars().collect();
        let before = self.track();

        match new.len().cmp(&prev.len()) {
            Ordering::Greater => {
                for &ch in &new[prev.len()..] {
                    self.put_letter(ch);
                }
            }
            Ordering::Less => {
                for _ in new.len()..prev.len() {
                    self.take_letter(true);
                }
            }
            Ordering::Equal => {
                if let Some(change) = prev.iter().zip(&new).position(|(a, b)| a != b) {
                    for _ in change..prev.len() {
                        self.take_letter(true);
                    }
                    for &ch in &new[change..] {
                        self.put_letter(ch);
                    }
                }
            }
        }

        self.publish(before);
    }

    fn put_letter(&mut self, ch: char) {
        let Some(target) = self.target() else {
            return;
        };

        let letter = (ch != EMPTY_CELL).then(|| normalize_letter(ch));
        log::trace!("set {:?} at ({}, {})", letter, target.x, target.y);
        self.write_letter(target, letter);

        if !self.active.is_last() {
            self.active.target += 1;
        }
    }

    fn take_letter(&mut self, backpedal: bool) {
        let Some(mut target) = self.target() else {
            return;
        };

        if backpedal && !self.active.is_first() && self.letter(target).is_none() {
            self.active.target -= 1;
            if let Some(prev) = self.target() {
                target = prev;
            }
        }

        log::trace!("clear ({}, {})", target.x, target.y);
        self.write_letter(target, None);
    }

    // Check and reveal

    /// Clear wrong letters in the active entry, then deactivate
    ///
    /// Returns the number of letters cleared. Cells without a known answer
    /// are left alone.
    pub fn check_answer(&mut self) -> usize {
        let before = self.track();
        let cells: Vec<Position> = self.active.positions().collect();
        let cleared = self.clear_wrong(cells);
        self.active.clear();
        self.publish(before);
        cleared
    }

    /// Clear wrong letters across the whole grid
    pub fn check_all(&mut self) -> usize {
        let before = self.track();
        self.active.clear();
        let cells: Vec<Position> = self.lights().collect();
        let cleared = self.clear_wrong(cells);
        self.publish(before);
        cleared
    }

    fn clear_wrong(&mut self, cells: Vec<Position>) -> usize {
        let mut cleared = 0;
        for pos in cells {
            let Some(cell) = self.at(pos) else {
                continue;
            };
            if let (Some(letter), Some(answer)) = (cell.letter(), cell.answer()) {
                if normalize_letter(letter) != normalize_letter(answer) {
                    self.write_letter(pos, None);
                    cleared += 1;
                }
            }
        }
        log::debug!("check cleared {} letters", cleared);
        cleared
    }

    /// Reveal the answer of the active entry, then deactivate
    pub fn show_answer(&mut self) {
        let before = self.track();
        let cells: Vec<Position> = self.active.positions().collect();
        self.reveal(cells);
        self.active.clear();
        self.publish(before);
    }

    /// Reveal every known answer
    pub fn show_solution(&mut self) {
        let before = self.track();
        self.active.clear();
        let cells: Vec<Position> = self.lights().collect();
        self.reveal(cells);
        self.publish(before);
    }

    fn reveal(&mut self, cells: Vec<Position>) {
        for pos in cells {
            if let Some(answer) = self.at(pos).and_then(|cell| cell.answer()) {
                self.write_letter(pos, Some(answer));
            }
        }
    }

    /// Remove every letter and deactivate
    pub fn clear_all(&mut self) {
        let before = self.track();
        self.active.clear();
        let cells: Vec<Position> = self.lights().collect();
        for pos in cells {
            self.write_letter(pos, None);
        }
        self.publish(before);
    }

    /// Store the answer key, `answers[y][x]`
    ///
    /// Entries for blocks are ignored.
    pub fn set_answers(&mut self, answers: &[Vec<Option<char>>]) -> GridResult<()> {
        let size = self.size();
        if answers.len() != size || answers.iter().any(|row| row.len() != size) {
            return Err(GridError::DimensionMismatch(format!(
                "answer matrix must be {}x{}",
                size, size
            )));
        }

        for (y, row) in answers.iter().enumerate() {
            for (x, answer) in row.iter().enumerate() {
                self.write_answer(Position::new(x, y), answer.map(normalize_letter));
            }
        }
        Ok(())
    }

    // Active entry text

    /// Letters of the active entry, `.` for empty cells
    pub fn active_entry_text(&self) -> String {
        self.active
            .positions()
            .map(|pos| self.letter(pos).unwrap_or(EMPTY_CELL))
            .collect()
    }

    /// Like [`Grid::active_entry_text`], keeping only letters held in place by
    /// a crossing entry
    pub fn active_checkers(&self) -> String {
        let direction = self.active.direction;
        self.active
            .positions()
            .map(|pos| {
                if self.has_checker(pos, direction) {
                    self.letter(pos).unwrap_or(EMPTY_CELL)
                } else {
                    EMPTY_CELL
                }
            })
            .collect()
    }

    /// True if a neighbour across the other axis holds a letter
    pub fn has_checker(&self, pos: Position, direction: Direction) -> bool {
        let cross = direction.flip();
        [false, true].into_iter().any(|forward| {
            self.light_neighbor(pos, cross, forward)
                .and_then(|next| self.letter(next))
                .is_some()
        })
    }

    /// Write an accepted word over the active entry
    ///
    /// Characters other than letters are skipped. The cursor does not move.
    pub fn set_active_entry(&mut self, word: &str) {
        let before = self.track();
        let cells: Vec<Position> = self.active.positions().collect();
        let letters = word
            .chars()
            .filter(|ch| ch.is_alphabetic())
            .map(normalize_letter);
        for (pos, letter) in cells.into_iter().zip(letters) {
            self.write_letter(pos, Some(letter));
        }
        self.publish(before);
    }

    /// Clear the cells of the active entry that no crossing letter holds
    pub fn reset_active_entry(&mut self) {
        let before = self.track();
        let direction = self.active.direction;
        let loose: Vec<Position> = self
            .active
            .positions()
            .filter(|&pos| !self.has_checker(pos, direction))
            .collect();
        for pos in loose {
            self.write_letter(pos, None);
        }
        self.publish(before);
    }

    pub fn active_direction(&self) -> Option<Direction> {
        self.is_active().then_some(self.active.direction)
    }

    /// Index of the active entry within its direction's clue list
    pub fn active_index(&self) -> Option<usize> {
        let direction = self.active_direction()?;
        let anchor = self.active.anchor;
        self.clue_positions(direction)
            .iter()
            .position(|clue| clue.x == anchor.x && clue.y == anchor.y)
    }
}
