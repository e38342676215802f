//! Active entry selection and movement

use crate::{
    cell::{Direction, Position},
    entry::ActiveEntry,
    grid::Grid,
};

impl Grid {
    /// Activate the entry through a clicked cell
    ///
    /// Returns true if an entry is active afterwards. Clicking a block clears
    /// the active entry; clicking outside the grid is ignored.
    pub fn activate_clicked(&mut self, x: usize, y: usize) -> bool {
        let pos = Position::new(x, y);
        if self.index(pos).is_none() {
            return false;
        }

        let before = self.track();
        let activated = match self.click_direction(pos) {
            Some(direction) => {
                self.select(pos, direction);
                true
            }
            None => {
                self.active.clear();
                false
            }
        };
        self.publish(before);
        activated
    }

    fn click_direction(&self, pos: Position) -> Option<Direction> {
        if !self.is_light(pos) {
            return None;
        }

        let current = self.active.direction;
        let across = self.heads(pos, Direction::Across);
        let down = self.heads(pos, Direction::Down);

        let direction = if self.is_target(pos) {
            self.prefer(pos, current.flip())
        } else if across && !down {
            Direction::Across
        } else if down && !across {
            Direction::Down
        } else {
            self.prefer(pos, current)
        };
        Some(direction)
    }

    /// `direction` if the cell supports it, else the other one
    fn prefer(&self, pos: Position, direction: Direction) -> Direction {
        if self.supports(pos, direction) {
            direction
        } else {
            direction.flip()
        }
    }

    /// Activate the next entry in reading order, across entries first
    ///
    /// With nothing active the sweep starts at the first across entry.
    /// Returns false only if the grid has no entries at all.
    pub fn activate_next(&mut self) -> bool {
        let total = self.size() * self.size();
        let (mut index, mut direction) = match self.active_start() {
            Some(start) => start,
            None => (total - 1, Direction::Down),
        };

        for _ in 0..2 * total {
            index += 1;
            if index == total {
                index = 0;
                direction = direction.flip();
            }
            if self.try_head(index, direction) {
                return true;
            }
        }
        false
    }

    /// Activate the previous entry in reading order
    ///
    /// With nothing active the sweep starts at the last down entry.
    pub fn activate_previous(&mut self) -> bool {
        let total = self.size() * self.size();
        let (mut index, mut direction) = match self.active_start() {
            Some(start) => start,
            None => (0, Direction::Across),
        };

        for _ in 0..2 * total {
            if index == 0 {
                index = total - 1;
                direction = direction.flip();
            } else {
                index -= 1;
            }
            if self.try_head(index, direction) {
                return true;
            }
        }
        false
    }

    fn active_start(&self) -> Option<(usize, Direction)> {
        if !self.active.is_active() {
            return None;
        }
        self.index(self.active.anchor)
            .map(|index| (index, self.active.direction))
    }

    fn try_head(&mut self, index: usize, direction: Direction) -> bool {
        let size = self.size();
        let pos = Position::new(index % size, index / size);
        if !self.heads(pos, direction) {
            return false;
        }

        let before = self.track();
        self.select(pos, direction);
        self.publish(before);
        true
    }

    /// Move the target cell by one step, keeping the direction where possible
    ///
    /// Moves onto blocks or off the grid are ignored and return false.
    pub fn move_target(&mut self, dx: isize, dy: isize) -> bool {
        let Some(target) = self.target() else {
            return false;
        };
        let Some(next) = target.offset(dx, dy, self.size()) else {
            return false;
        };
        if !self.is_light(next) {
            return false;
        }

        let before = self.track();
        let direction = self.prefer(next, self.active.direction);
        self.select(next, direction);
        self.publish(before);
        true
    }

    /// Deactivate the current entry
    pub fn clear_active(&mut self) {
        let before = self.track();
        self.active.clear();
        self.publish(before);
    }

    /// Activate the run through `pos` along `direction`, targeting `pos`
    pub(crate) fn select(&mut self, pos: Position, direction: Direction) {
        let mut anchor = pos;
        let mut target = 0;
        while let Some(prev) = self.light_neighbor(anchor, direction, false) {
            anchor = prev;
            target += 1;
        }

        self.active = ActiveEntry {
            anchor,
            direction,
            length: self.run_length(anchor, direction),
            target,
        };
        log::debug!(
            "active entry {:?} at ({}, {}), length {}, target {}",
            direction,
            anchor.x,
            anchor.y,
            self.active.length,
            target
        );
    }
}
