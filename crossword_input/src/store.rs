//! Key-value stores for saved progress
//!
//! [`MemoryStore`] backs tests and short-lived hosts. [`FileStore`] keeps
//! every key in one JSON document on disk, rewritten after each change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Persistent string storage keyed by name
pub trait LetterStore {
    /// Stored value, `None` if the key is absent
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl LetterStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A stored value and when it was written, in seconds since the epoch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: String,
    pub saved_at: u64,
}

/// On-disk document of a [`FileStore`]
/// Uses BTreeMap for stable ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    /// Version of the store format (for future migrations)
    pub version: u32,
    pub entries: BTreeMap<String, StoredValue>,
}

impl StoreData {
    /// Current version of the store format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl Default for StoreData {
    fn default() -> Self {
        Self::new()
    }
}

/// Store persisted as a single JSON file
///
/// Values older than `expiry_days` read as absent and are dropped on the
/// next write. An expiry of zero keeps values forever.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    expiry_days: u32,
    data: StoreData,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl AsRef<Path>, expiry_days: u32) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let bytes = fs::read(&path)?;
            let data: StoreData = serde_json::from_slice(&bytes)?;
            if data.version != StoreData::CURRENT_VERSION {
                return Err(StoreError::UnsupportedVersion(data.version));
            }
            data
        } else {
            StoreData::new()
        };

        log::info!(
            "opened store {} with {} entries",
            path.display(),
            data.entries.len()
        );
        Ok(Self {
            path,
            expiry_days,
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.data.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.entries.is_empty()
    }

    /// Drop values that have expired by `now`; returns how many went
    pub fn purge_expired_at(&mut self, now: u64) -> StoreResult<usize> {
        let before = self.data.entries.len();
        let expiry_days = self.expiry_days;
        self.data
            .entries
            .retain(|_, stored| !is_expired(stored, expiry_days, now));
        let purged = before - self.data.entries.len();
        if purged > 0 {
            self.flush()?;
        }
        Ok(purged)
    }

    /// Write the document to disk
    pub fn flush(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(&self.data)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl LetterStore for FileStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let now = now_secs();
        Ok(self
            .data
            .entries
            .get(key)
            .filter(|stored| !is_expired(stored, self.expiry_days, now))
            .map(|stored| stored.value.clone()))
    }

    fn save(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let now = now_secs();
        let expiry_days = self.expiry_days;
        self.data
            .entries
            .retain(|_, stored| !is_expired(stored, expiry_days, now));
        self.data.entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                saved_at: now,
            },
        );
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.data.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

fn is_expired(stored: &StoredValue, expiry_days: u32, now: u64) -> bool {
    expiry_days > 0 && now.saturating_sub(stored.saved_at) > u64::from(expiry_days) * SECONDS_PER_DAY
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
