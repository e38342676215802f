//! Grid snapshot for deterministic parity testing

use serde::{Deserialize, Serialize};

use crate::{cell::Direction, entry::ActiveEntry};

/// Per-cell state captured in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub light: bool,
    pub head: bool,
    pub number: Option<u32>,
    pub letter: Option<char>,
}

/// Complete grid state snapshot for parity testing
///
/// Answers and the listener are not captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: usize,
    pub cells: Vec<CellSnapshot>,
    pub active: ActiveEntry,
}

impl GridSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in parity tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update((self.size as u64).to_le_bytes());

        for cell in &self.cells {
            hasher.update([cell.light as u8, cell.head as u8]);
            hasher.update(cell.number.unwrap_or(0).to_le_bytes());
            let mut buf = [0u8; 4];
            hasher.update(cell.letter.unwrap_or('.').encode_utf8(&mut buf).as_bytes());
        }

        // Hash active entry
        hasher.update((self.active.anchor.x as u64).to_le_bytes());
        hasher.update((self.active.anchor.y as u64).to_le_bytes());
        hasher.update([matches!(self.active.direction, Direction::Down) as u8]);
        hasher.update((self.active.length as u64).to_le_bytes());
        hasher.update((self.active.target as u64).to_le_bytes());

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Letters in row-major order, `.` for empty lights and `#` for blocks
    pub fn render(&self) -> Vec<String> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| match (cell.light, cell.letter) {
                        (false, _) => '#',
                        (true, Some(letter)) => letter,
                        (true, None) => '.',
                    })
                    .collect()
            })
            .collect()
    }
}
