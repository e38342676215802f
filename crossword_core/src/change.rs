//! Change notifications

use serde::{Deserialize, Serialize};

/// What an operation changed, as reported to the grid's listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Active entry anchor, direction or target moved
    Move,
    /// Letter contents changed
    Text,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Move => "move",
            ChangeKind::Text => "text",
        }
    }
}
