//! Input and storage settings

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Tunables for the input bridge and the stores
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Character filling untyped positions of the hidden field
    pub placeholder: char,
    /// Placeholders seeded on reset, plus one
    pub buffer_padding: usize,
    /// Handle backspace as a key instead of waiting for the field to change
    pub legacy_backspace: bool,
    /// Saved letters for puzzle N live under `{storage_prefix}{N}`
    pub storage_prefix: String,
    /// Key of the construction draft
    pub draft_name: String,
    /// How long stores that support expiry keep saved letters
    pub expiry_days: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            placeholder: '.',
            buffer_padding: 100,
            legacy_backspace: false,
            storage_prefix: "puzzle".to_string(),
            draft_name: "create".to_string(),
            expiry_days: 30,
        }
    }
}

impl InputConfig {
    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn storage_key(&self, number: u32) -> String {
        format!("{}{}", self.storage_prefix, number)
    }

    /// Contents of the hidden field after a reset
    pub fn seed_buffer(&self) -> String {
        std::iter::repeat(self.placeholder)
            .take(self.buffer_padding + 1)
            .collect()
    }
}
