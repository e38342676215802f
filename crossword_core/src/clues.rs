//! Clue positions and clue lists
//!
//! Positions are derived from the grid on demand; clue lists carry the
//! setter's text and enumerations and are kept in step with the grid by
//! [`renumber_clues`] after a layout change.

use serde::{Deserialize, Serialize};

use crate::{
    cell::Direction,
    error::{GridError, GridResult},
    grid::Grid,
    ipuz::IpuzClue,
};

/// Where an entry starts, its clue number and its length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CluePosition {
    pub x: usize,
    pub y: usize,
    pub number: u32,
    pub length: usize,
}

/// Clue positions of a grid, each list in reading order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClueData {
    pub across: Vec<CluePosition>,
    pub down: Vec<CluePosition>,
}

impl ClueData {
    pub fn get(&self, direction: Direction) -> &[CluePosition] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }
}

/// A clue as written by the setter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub x: usize,
    pub y: usize,
    pub number: u32,
    pub text: String,
    pub enumeration: String,
}

impl Clue {
    /// Clue with no text and a single-word enumeration
    pub fn blank(position: &CluePosition) -> Self {
        Self {
            x: position.x,
            y: position.y,
            number: position.number,
            text: String::new(),
            enumeration: position.length.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    pub fn to_ipuz(&self) -> IpuzClue {
        IpuzClue {
            number: self.number,
            clue: self.text.clone(),
            enumeration: self.enumeration.clone(),
        }
    }
}

/// Word lengths of an answer: `"VERTICAL TAKE-OFF"` gives `"8,4-3"`
///
/// Apostrophes do not count towards a word's length.
pub fn enumeration(answer: &str) -> String {
    answer
        .split_whitespace()
        .map(|word| {
            word.split('-')
                .map(|part| part.chars().filter(|&ch| ch != '\'').count().to_string())
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Total letter count of an enumeration such as `"3,4-2"`
pub fn word_length(enumeration: &str) -> usize {
    enumeration
        .split(|ch: char| !ch.is_ascii_digit())
        .filter_map(|digits| digits.parse::<usize>().ok())
        .sum()
}

/// Fresh clue list for a new grid
pub fn blank_clues(positions: &[CluePosition]) -> Vec<Clue> {
    positions.iter().map(Clue::blank).collect()
}

/// Pair ipuz clues with the grid's positions by clue number
///
/// Positions without a clue get a blank one; a clue whose number has no
/// position is an error.
pub fn clues_from_ipuz(clues: &[IpuzClue], positions: &[CluePosition]) -> GridResult<Vec<Clue>> {
    if let Some(stray) = clues
        .iter()
        .find(|clue| !positions.iter().any(|pos| pos.number == clue.number))
    {
        return Err(GridError::UnknownClue(stray.number));
    }

    Ok(positions
        .iter()
        .map(|pos| match clues.iter().find(|clue| clue.number == pos.number) {
            Some(clue) => Clue {
                x: pos.x,
                y: pos.y,
                number: pos.number,
                text: clue.clue.clone(),
                enumeration: if clue.enumeration.is_empty() {
                    pos.length.to_string()
                } else {
                    clue.enumeration.clone()
                },
            },
            None => Clue::blank(pos),
        })
        .collect())
}

/// Carry a clue list over to renumbered positions
///
/// An existing clue survives when its entry start moved by at most one cell
/// along `direction` on the same row (across) or column (down). Survivors
/// keep their text and take the new number; their enumeration is reset when
/// the length no longer adds up. New positions get blank clues and clues
/// with no position left are dropped.
pub fn renumber_clues(existing: &[Clue], positions: &[CluePosition], direction: Direction) -> Vec<Clue> {
    let mut result = Vec::with_capacity(positions.len());
    let mut old = existing.iter().peekable();
    let mut fresh = positions.iter().peekable();

    while let Some(&pos) = fresh.peek() {
        match old.peek() {
            Some(&clue) if same_entry(clue, pos, direction) => {
                let enumeration = if word_length(&clue.enumeration) == pos.length {
                    clue.enumeration.clone()
                } else {
                    pos.length.to_string()
                };
                result.push(Clue {
                    x: pos.x,
                    y: pos.y,
                    number: pos.number,
                    text: clue.text.clone(),
                    enumeration,
                });
                old.next();
                fresh.next();
            }
            Some(&clue) if (pos.y, pos.x) > (clue.y, clue.x) => {
                old.next();
            }
            _ => {
                result.push(Clue::blank(pos));
                fresh.next();
            }
        }
    }

    result
}

fn same_entry(clue: &Clue, pos: &CluePosition, direction: Direction) -> bool {
    match direction {
        Direction::Across => clue.y == pos.y && clue.x.abs_diff(pos.x) <= 1,
        Direction::Down => clue.x == pos.x && clue.y.abs_diff(pos.y) <= 1,
    }
}

impl Grid {
    /// Entries starting in `direction`, in reading order
    pub fn clue_positions(&self, direction: Direction) -> Vec<CluePosition> {
        self.cells()
            .filter(|&(pos, _)| self.heads(pos, direction))
            .filter_map(|(pos, cell)| {
                cell.number().map(|number| CluePosition {
                    x: pos.x,
                    y: pos.y,
                    number,
                    length: self.run_length(pos, direction),
                })
            })
            .collect()
    }

    pub fn clue_data(&self) -> ClueData {
        ClueData {
            across: self.clue_positions(Direction::Across),
            down: self.clue_positions(Direction::Down),
        }
    }
}
