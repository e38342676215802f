//! ipuz interchange documents
//!
//! Only the subset of the format the grid produces is modelled: square
//! crosswords whose `puzzle` cells are clue numbers (0 for unnumbered
//! lights) or the block marker, and whose `solution` cells are letters, 0
//! or the block marker.

use serde::{Deserialize, Serialize};

use crate::{
    cell::{normalize_letter, Cell, Direction, Position},
    error::{GridError, GridResult},
    grid::Grid,
};

pub const IPUZ_VERSION: &str = "http://ipuz.org/v2";
pub const IPUZ_KIND: &str = "http://ipuz.org/crossword#1";
pub const DEFAULT_BLOCK: &str = "#";

/// A single puzzle or solution cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpuzCell {
    Number(u32),
    Text(String),
}

impl IpuzCell {
    pub fn block() -> Self {
        IpuzCell::Text(DEFAULT_BLOCK.to_string())
    }

    pub fn empty() -> Self {
        IpuzCell::Number(0)
    }

    pub fn is_block(&self, marker: &str) -> bool {
        matches!(self, IpuzCell::Text(text) if text == marker)
    }

    /// Clue number of a puzzle cell, `None` for 0 and text
    pub fn number(&self) -> Option<u32> {
        match self {
            IpuzCell::Number(n) if *n > 0 => Some(*n),
            _ => None,
        }
    }

    /// Letter of a solution cell
    pub fn letter(&self) -> Option<char> {
        match self {
            IpuzCell::Text(text) => text.chars().next().map(normalize_letter),
            IpuzCell::Number(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpuzClue {
    pub number: u32,
    pub clue: String,
    #[serde(default)]
    pub enumeration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IpuzClues {
    #[serde(rename = "Across", default)]
    pub across: Vec<IpuzClue>,
    #[serde(rename = "Down", default)]
    pub down: Vec<IpuzClue>,
}

impl IpuzClues {
    pub fn get(&self, direction: Direction) -> &[IpuzClue] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }
}

/// A crossword in ipuz form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipuz {
    pub version: String,
    pub kind: Vec<String>,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub showenumerations: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    pub puzzle: Vec<Vec<IpuzCell>>,
    #[serde(default)]
    pub solution: Vec<Vec<IpuzCell>>,
    #[serde(default)]
    pub clues: IpuzClues,
}

impl Ipuz {
    pub fn new(
        size: usize,
        puzzle: Vec<Vec<IpuzCell>>,
        solution: Vec<Vec<IpuzCell>>,
        across: Vec<IpuzClue>,
        down: Vec<IpuzClue>,
    ) -> Self {
        Self {
            version: IPUZ_VERSION.to_string(),
            kind: vec![IPUZ_KIND.to_string()],
            dimensions: Dimensions {
                width: size,
                height: size,
            },
            showenumerations: true,
            block: None,
            puzzle,
            solution,
            clues: IpuzClues { across, down },
        }
    }

    pub fn from_json(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> GridResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn block_marker(&self) -> &str {
        self.block.as_deref().unwrap_or(DEFAULT_BLOCK)
    }

    /// Side length, after checking that every matrix is square and matches
    /// the declared dimensions
    pub fn size(&self) -> GridResult<usize> {
        let Dimensions { width, height } = self.dimensions;
        if width == 0 {
            return Err(GridError::EmptyGrid);
        }
        if width != height {
            return Err(GridError::DimensionMismatch(format!(
                "grid is {}x{}, expected a square",
                width, height
            )));
        }

        check_matrix("puzzle", &self.puzzle, width)?;
        if !self.solution.is_empty() {
            check_matrix("solution", &self.solution, width)?;
        }
        Ok(width)
    }

    /// Cell carrying clue `number` in the puzzle matrix
    pub fn start_position(&self, number: u32) -> Option<Position> {
        self.puzzle.iter().enumerate().find_map(|(y, row)| {
            row.iter()
                .position(|cell| cell.number() == Some(number))
                .map(|x| Position::new(x, y))
        })
    }

    /// Answer to `clue` read from the solution, `.` for unknown letters
    ///
    /// Word breaks from the enumeration are re-inserted as spaces and
    /// hyphens, so `"8,4-3"` reads back as `"VERTICAL TAKE-OFF"`.
    pub fn answer(&self, clue: &IpuzClue, direction: Direction) -> Option<String> {
        let mut pos = self.start_position(clue.number)?;
        let marker = self.block_marker();

        let mut letters = Vec::new();
        while let Some(cell) = self.solution.get(pos.y).and_then(|row| row.get(pos.x)) {
            if cell.is_block(marker) {
                break;
            }
            letters.push(cell.letter().unwrap_or('.'));
            pos = pos.advance(direction, 1);
        }

        let breaks = word_breaks(&clue.enumeration);
        let mut answer = String::with_capacity(letters.len() + breaks.len());
        let mut pending = breaks.into_iter().peekable();
        for (i, letter) in letters.into_iter().enumerate() {
            while let Some(&(at, separator)) = pending.peek() {
                if at > i {
                    break;
                }
                if at == i {
                    answer.push(separator);
                }
                pending.next();
            }
            answer.push(letter);
        }
        Some(answer)
    }
}

/// Letter offsets at which an enumeration starts a new word, with the
/// separator to insert there
fn word_breaks(enumeration: &str) -> Vec<(usize, char)> {
    let mut breaks = Vec::new();
    let mut offset = 0;
    let mut digits = String::new();
    for ch in enumeration.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        offset += digits.parse::<usize>().unwrap_or(0);
        digits.clear();
        match ch {
            ',' | ' ' => breaks.push((offset, ' ')),
            '-' => breaks.push((offset, '-')),
            _ => {}
        }
    }
    breaks
}

fn check_matrix(name: &str, matrix: &[Vec<IpuzCell>], size: usize) -> GridResult<()> {
    if matrix.len() != size {
        return Err(GridError::DimensionMismatch(format!(
            "{} has {} rows, expected {}",
            name,
            matrix.len(),
            size
        )));
    }
    if let Some((y, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != size) {
        return Err(GridError::DimensionMismatch(format!(
            "{} row {} has {} cells, expected {}",
            name,
            y,
            row.len(),
            size
        )));
    }
    Ok(())
}

impl Grid {
    /// Puzzle matrix: block marker, clue number or 0
    pub fn ipuz_puzzle(&self) -> Vec<Vec<IpuzCell>> {
        self.ipuz_matrix(|cell| {
            if cell.is_block() {
                IpuzCell::block()
            } else {
                cell.number().map_or_else(IpuzCell::empty, IpuzCell::Number)
            }
        })
    }

    /// Solution matrix: block marker, entered letter or 0
    pub fn ipuz_solution(&self) -> Vec<Vec<IpuzCell>> {
        self.ipuz_matrix(|cell| {
            if cell.is_block() {
                IpuzCell::block()
            } else {
                cell.letter()
                    .map_or_else(IpuzCell::empty, |letter| IpuzCell::Text(letter.to_string()))
            }
        })
    }

    fn ipuz_matrix<F>(&self, f: F) -> Vec<Vec<IpuzCell>>
    where
        F: Fn(&Cell) -> IpuzCell,
    {
        let size = self.size();
        (0..size)
            .map(|y| {
                (0..size)
                    .filter_map(|x| self.cell(x, y).map(&f))
                    .collect()
            })
            .collect()
    }

    pub fn to_ipuz(&self, across: Vec<IpuzClue>, down: Vec<IpuzClue>) -> Ipuz {
        Ipuz::new(self.size(), self.ipuz_puzzle(), self.ipuz_solution(), across, down)
    }

    /// Rebuild a grid under construction, the solution becoming its letters
    pub fn from_ipuz(ipuz: &Ipuz) -> GridResult<Self> {
        let mut grid = Self::layout_from_ipuz(ipuz)?;
        for (pos, letter) in solution_letters(ipuz) {
            grid.write_letter(pos, Some(letter));
        }
        Ok(grid)
    }

    /// Build a grid to solve, the solution becoming its answer key
    pub fn solver_from_ipuz(ipuz: &Ipuz) -> GridResult<Self> {
        let mut grid = Self::layout_from_ipuz(ipuz)?;
        for (pos, letter) in solution_letters(ipuz) {
            grid.write_answer(pos, Some(letter));
        }
        Ok(grid)
    }

    fn layout_from_ipuz(ipuz: &Ipuz) -> GridResult<Self> {
        ipuz.size()?;
        let marker = ipuz.block_marker();
        let blocks: Vec<Vec<bool>> = ipuz
            .puzzle
            .iter()
            .map(|row| row.iter().map(|cell| cell.is_block(marker)).collect())
            .collect();
        let grid = Self::from_blocks(&blocks)?;

        for (y, row) in ipuz.puzzle.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let solved = ipuz.solution.get(y).and_then(|row| row.get(x));
                if solved.is_some_and(|solved| solved.is_block(marker) != cell.is_block(marker)) {
                    return Err(GridError::InvalidCell { x, y });
                }

                let expected = grid.cell(x, y).and_then(|cell| cell.number());
                if !cell.is_block(marker) && cell.number() != expected {
                    log::warn!(
                        "ipuz number {:?} at ({}, {}) disagrees with grid numbering {:?}",
                        cell.number(),
                        x,
                        y,
                        expected
                    );
                }
            }
        }

        log::debug!("loaded {}x{} grid from ipuz", grid.size(), grid.size());
        Ok(grid)
    }
}

fn solution_letters(ipuz: &Ipuz) -> impl Iterator<Item = (Position, char)> + '_ {
    let marker = ipuz.block_marker();
    ipuz.solution.iter().enumerate().flat_map(move |(y, row)| {
        row.iter().enumerate().filter_map(move |(x, cell)| {
            if cell.is_block(marker) {
                None
            } else {
                cell.letter().map(|letter| (Position::new(x, y), letter))
            }
        })
    })
}
