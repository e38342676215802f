//! Platform-independent key representation

use serde::{Deserialize, Serialize};

/// Keys the grid reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Printable
    Char(char),

    // Navigation
    Left,
    Right,
    Up,
    Down,
    Tab,
    BackTab,

    // Special keys
    Enter,
    Escape,
    Backspace,
    Delete,
}

impl Key {
    /// Convert a DOM key code to Key
    pub fn from_key_code(code: u32, shift: bool) -> Option<Self> {
        match code {
            8 => Some(Key::Backspace),
            9 if shift => Some(Key::BackTab),
            9 => Some(Key::Tab),
            13 => Some(Key::Enter),
            27 => Some(Key::Escape),
            37 => Some(Key::Left),
            38 => Some(Key::Up),
            39 => Some(Key::Right),
            40 => Some(Key::Down),
            46 => Some(Key::Delete),
            _ => None,
        }
    }

    /// Target movement for arrow keys
    pub fn arrow_delta(&self) -> Option<(isize, isize)> {
        match self {
            Key::Left => Some((-1, 0)),
            Key::Right => Some((1, 0)),
            Key::Up => Some((0, -1)),
            Key::Down => Some((0, 1)),
            _ => None,
        }
    }
}
