//! Grid state: cells, numbering and change tracking
//!
//! Navigation lives in `navigation.rs` and letter editing in `editing.rs`;
//! both extend [`Grid`] with further `impl` blocks.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    cell::{Cell, Direction, Position},
    change::ChangeKind,
    entry::ActiveEntry,
    error::{GridError, GridResult},
    snapshot::{CellSnapshot, GridSnapshot},
};

/// Capabilities of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridOptions {
    /// Allow toggling cells between light and block
    pub editable: bool,
}

/// State captured before an operation so the listener can be told what moved
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tracker {
    active: ActiveEntry,
    revision: u64,
}

type Listener = Box<dyn FnMut(ChangeKind)>;

/// A square crossword grid
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    pub(crate) active: ActiveEntry,
    options: GridOptions,
    revision: u64,
    listener: Option<Listener>,
}

impl Grid {
    /// Create a grid of `size` x `size` light cells
    pub fn new(size: usize) -> GridResult<Self> {
        if size == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self::from_cells(size, vec![Cell::light(); size * size]))
    }

    /// Create a grid from a block pattern, `blocks[y][x] == true` marking a block
    pub fn from_blocks(blocks: &[Vec<bool>]) -> GridResult<Self> {
        let size = blocks.len();
        if size == 0 {
            return Err(GridError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in blocks.iter().enumerate() {
            if line.len() != size {
                return Err(GridError::NotSquare {
                    row,
                    expected: size,
                    found: line.len(),
                });
            }
            cells.extend(
                line.iter()
                    .map(|&block| if block { Cell::block() } else { Cell::light() }),
            );
        }

        Ok(Self::from_cells(size, cells))
    }

    fn from_cells(size: usize, cells: Vec<Cell>) -> Self {
        let mut grid = Self {
            size,
            cells,
            active: ActiveEntry::empty(),
            options: GridOptions::default(),
            revision: 0,
            listener: None,
        };
        grid.renumber();
        grid
    }

    pub fn with_options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    // Public accessors for rendering/testing

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn options(&self) -> GridOptions {
        self.options
    }

    pub fn is_editable(&self) -> bool {
        self.options.editable
    }

    pub fn active(&self) -> &ActiveEntry {
        &self.active
    }

    pub fn is_active(&self) -> bool {
        self.active.is_active()
    }

    /// Cell receiving the next typed letter
    pub fn target(&self) -> Option<Position> {
        self.active.target_position()
    }

    pub fn is_target(&self, pos: Position) -> bool {
        self.target() == Some(pos)
    }

    /// True for cells of the active entry
    pub fn is_highlighted(&self, pos: Position) -> bool {
        self.active.contains(pos)
    }

    /// Counter bumped whenever letters or layout change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.at(Position::new(x, y))
    }

    pub fn at(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// All cells in row-major order, paired with their positions
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Position::new(i % size, i / size), cell))
    }

    /// Light cells in row-major order
    pub fn lights(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells()
            .filter(|(_, cell)| cell.is_light())
            .map(|(pos, _)| pos)
    }

    pub fn light_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_light()).count()
    }

    pub fn is_light(&self, pos: Position) -> bool {
        self.at(pos).is_some_and(|cell| cell.is_light())
    }

    pub fn letter(&self, pos: Position) -> Option<char> {
        self.at(pos).and_then(|cell| cell.letter())
    }

    /// True if `pos` begins an entry in `direction`
    pub fn heads(&self, pos: Position, direction: Direction) -> bool {
        self.at(pos).is_some_and(|cell| cell.is_head()) && self.starts_run(pos, direction)
    }

    /// True if `pos` is light with at least one light neighbour along `direction`
    pub fn supports(&self, pos: Position, direction: Direction) -> bool {
        self.is_light(pos)
            && (self.light_neighbor(pos, direction, false).is_some()
                || self.light_neighbor(pos, direction, true).is_some())
    }

    pub(crate) fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.size && pos.y < self.size).then(|| pos.y * self.size + pos.x)
    }

    pub(crate) fn checked(&self, x: usize, y: usize) -> GridResult<Position> {
        let pos = Position::new(x, y);
        self.index(pos)
            .map(|_| pos)
            .ok_or(GridError::OutOfBounds { x, y })
    }

    /// Adjacent cell along `direction`, before (`forward == false`) or after
    pub(crate) fn neighbor(&self, pos: Position, direction: Direction, forward: bool) -> Option<Position> {
        let step = if forward { 1 } else { -1 };
        match direction {
            Direction::Across => pos.offset(step, 0, self.size),
            Direction::Down => pos.offset(0, step, self.size),
        }
    }

    pub(crate) fn light_neighbor(&self, pos: Position, direction: Direction, forward: bool) -> Option<Position> {
        self.neighbor(pos, direction, forward)
            .filter(|next| self.is_light(*next))
    }

    fn starts_run(&self, pos: Position, direction: Direction) -> bool {
        self.is_light(pos)
            && self.light_neighbor(pos, direction, true).is_some()
            && self.light_neighbor(pos, direction, false).is_none()
    }

    /// Number of light cells from `pos` to the end of its run along `direction`
    pub(crate) fn run_length(&self, pos: Position, direction: Direction) -> usize {
        let mut length = 1;
        let mut end = pos;
        while let Some(next) = self.light_neighbor(end, direction, true) {
            end = next;
            length += 1;
        }
        length
    }

    /// Recompute head flags and clue numbers from the light pattern
    fn renumber(&mut self) {
        let mut number = 1;
        for i in 0..self.cells.len() {
            let pos = Position::new(i % self.size, i / self.size);
            let head = self.starts_run(pos, Direction::Across) || self.starts_run(pos, Direction::Down);
            let cell = &mut self.cells[i];
            cell.head = head;
            cell.number = if head {
                number += 1;
                Some(number - 1)
            } else {
                None
            };
        }
    }

    /// Flip a cell between light and block and renumber the grid
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> GridResult<()> {
        if !self.options.editable {
            return Err(GridError::LayoutLocked);
        }
        let pos = self.checked(x, y)?;
        let before = self.track();

        self.active.clear();
        if let Some(i) = self.index(pos) {
            let cell = &mut self.cells[i];
            if cell.light {
                *cell = Cell::block();
            } else {
                *cell = Cell::light();
            }
        }
        self.renumber();
        self.revision += 1;
        log::debug!("toggled cell ({}, {}), light={}", x, y, self.is_light(pos));

        self.publish(before);
        Ok(())
    }

    /// Write (or with `None`, remove) the letter of a light cell
    pub(crate) fn write_letter(&mut self, pos: Position, letter: Option<char>) {
        let Some(i) = self.index(pos) else {
            return;
        };
        let cell = &mut self.cells[i];
        if cell.light && cell.letter != letter {
            cell.letter = letter;
            self.revision += 1;
        }
    }

    pub(crate) fn write_answer(&mut self, pos: Position, answer: Option<char>) {
        if let Some(i) = self.index(pos) {
            if self.cells[i].light {
                self.cells[i].answer = answer;
            }
        }
    }

    // Change notification

    /// Register the callback fired after operations that move the active
    /// entry or change letters
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(ChangeKind) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub(crate) fn track(&self) -> Tracker {
        Tracker {
            active: self.active,
            revision: self.revision,
        }
    }

    pub(crate) fn publish(&mut self, before: Tracker) {
        let moved = before.active != self.active;
        let edited = before.revision != self.revision;
        if let Some(listener) = self.listener.as_mut() {
            if moved {
                listener(ChangeKind::Move);
            }
            if edited {
                listener(ChangeKind::Text);
            }
        }
    }

    /// Get a complete snapshot of grid state (for parity testing)
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size: self.size,
            cells: self
                .cells
                .iter()
                .map(|cell| CellSnapshot {
                    light: cell.light,
                    head: cell.head,
                    number: cell.number,
                    letter: cell.letter,
                })
                .collect(),
            active: self.active,
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("size", &self.size)
            .field("active", &self.active)
            .field("options", &self.options)
            .field("revision", &self.revision)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Grid of lights with blocks where both coordinates share parity
    /// `keep`, inside a border of `border` blocks
    pub(crate) fn alternating(size: usize, border: usize, keep: usize) -> Grid {
        let upper = size - border - 1;
        let blocks: Vec<Vec<bool>> = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| {
                        x < border
                            || y < border
                            || x > upper
                            || y > upper
                            || (x % 2 == keep && y % 2 == keep)
                    })
                    .collect()
            })
            .collect();
        Grid::from_blocks(&blocks).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::alternating;
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn numbers(grid: &Grid) -> Vec<(usize, usize, u32)> {
        grid.cells()
            .filter_map(|(pos, cell)| cell.number().map(|n| (pos.x, pos.y, n)))
            .collect()
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(Grid::from_blocks(&[]), Err(GridError::EmptyGrid)));
        assert!(matches!(Grid::new(0), Err(GridError::EmptyGrid)));
    }

    #[test]
    fn test_ragged_pattern_rejected() {
        let blocks = vec![vec![false, false], vec![false]];
        match Grid::from_blocks(&blocks) {
            Err(GridError::NotSquare { row, expected, found }) => {
                assert_eq!((row, expected, found), (1, 2, 1));
            }
            other => panic!("Expected NotSquare, got {:?}", other),
        }
    }

    #[test]
    fn test_numbering_three_by_three() {
        // Middle square blocked
        let grid = alternating(3, 0, 1);
        assert!(!grid.is_light(Position::new(1, 1)));
        assert_eq!(numbers(&grid), vec![(0, 0, 1), (2, 0, 2), (0, 2, 3)]);
    }

    #[test]
    fn test_numbering_keep_evens() {
        let grid = alternating(5, 0, 1);
        assert_eq!(
            numbers(&grid),
            vec![(0, 0, 1), (2, 0, 2), (4, 0, 3), (0, 2, 4), (0, 4, 5)]
        );
        assert!(grid.heads(Position::new(0, 0), Direction::Across));
        assert!(grid.heads(Position::new(0, 0), Direction::Down));
        assert!(!grid.heads(Position::new(2, 0), Direction::Across));
        assert!(grid.heads(Position::new(2, 0), Direction::Down));
        assert!(grid.heads(Position::new(0, 2), Direction::Across));
        assert!(!grid.heads(Position::new(0, 2), Direction::Down));
    }

    #[test]
    fn test_head_invariant() {
        let grid = alternating(7, 1, 0);
        for (pos, cell) in grid.cells() {
            let expected = cell.is_light()
                && (grid.starts_run(pos, Direction::Across) || grid.starts_run(pos, Direction::Down));
            assert_eq!(cell.is_head(), expected, "head flag at {:?}", pos);
            assert_eq!(cell.number().is_some(), cell.is_head());
        }
    }

    #[test]
    fn test_numbering_deterministic() {
        let first = alternating(9, 1, 1);
        let second = alternating(9, 1, 1);
        assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn test_single_light_not_head() {
        let blocks = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let grid = Grid::from_blocks(&blocks).unwrap();
        assert!(!grid.cell(1, 1).unwrap().is_head());
        assert!(!grid.supports(Position::new(1, 1), Direction::Across));
        assert!(!grid.supports(Position::new(1, 1), Direction::Down));
    }

    #[test]
    fn test_supports() {
        let grid = alternating(5, 0, 1);
        // Column 1 alternates light/block, so (1, 0) only runs across
        assert!(grid.supports(Position::new(1, 0), Direction::Across));
        assert!(!grid.supports(Position::new(1, 0), Direction::Down));
        assert!(!grid.supports(Position::new(1, 1), Direction::Across));
        assert!(!grid.supports(Position::new(9, 9), Direction::Across));
    }

    #[test]
    fn test_run_length() {
        let grid = alternating(5, 0, 1);
        assert_eq!(grid.run_length(Position::new(0, 0), Direction::Across), 5);
        assert_eq!(grid.run_length(Position::new(2, 0), Direction::Down), 5);
        assert_eq!(grid.run_length(Position::new(1, 0), Direction::Down), 1);
    }

    #[test]
    fn test_toggle_locked() {
        let mut grid = alternating(5, 0, 1);
        assert!(matches!(grid.toggle_cell(0, 0), Err(GridError::LayoutLocked)));
    }

    #[test]
    fn test_toggle_out_of_bounds() {
        let mut grid = alternating(5, 0, 1).with_options(GridOptions { editable: true });
        assert!(matches!(
            grid.toggle_cell(5, 0),
            Err(GridError::OutOfBounds { x: 5, y: 0 })
        ));
    }

    #[test]
    fn test_toggle_renumbers() {
        let mut grid = alternating(5, 0, 1).with_options(GridOptions { editable: true });
        grid.toggle_cell(1, 1).unwrap();
        assert!(grid.is_light(Position::new(1, 1)));
        // (1, 0) now heads a down entry
        assert!(grid.heads(Position::new(1, 0), Direction::Down));
        assert_eq!(grid.cell(1, 0).unwrap().number(), Some(2));
        assert_eq!(grid.cell(4, 0).unwrap().number(), Some(4));

        grid.toggle_cell(1, 1).unwrap();
        assert_eq!(grid.snapshot(), alternating(5, 0, 1).snapshot());
    }

    #[test]
    fn test_toggle_to_block_drops_letter() {
        let mut grid = alternating(5, 0, 1).with_options(GridOptions { editable: true });
        grid.write_letter(Position::new(0, 0), Some('X'));
        grid.toggle_cell(0, 0).unwrap();
        assert_eq!(grid.letter(Position::new(0, 0)), None);
        grid.toggle_cell(0, 0).unwrap();
        assert_eq!(grid.letter(Position::new(0, 0)), None);
    }

    #[test]
    fn test_write_letter_ignores_blocks() {
        let mut grid = alternating(5, 0, 1);
        let revision = grid.revision();
        grid.write_letter(Position::new(1, 1), Some('A'));
        assert_eq!(grid.letter(Position::new(1, 1)), None);
        assert_eq!(grid.revision(), revision);
    }

    #[test]
    fn test_listener_reports_toggle() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut grid = alternating(5, 0, 1).with_options(GridOptions { editable: true });
        grid.set_listener(move |kind| sink.borrow_mut().push(kind));

        grid.toggle_cell(2, 2).unwrap();
        assert_eq!(*events.borrow(), vec![ChangeKind::Text]);

        grid.clear_listener();
        grid.toggle_cell(2, 2).unwrap();
        assert_eq!(events.borrow().len(), 1);
    }
}
