//! Persistent key-value storage for history state
//!
//! The engine treats storage as an opaque synchronous key-value interface. Two backends:
//! - [`JsonFileStore`]: a single JSON object on disk, written atomically (temp file + rename)
//! - [`MemoryStore`]: in-process map used by tests and benches
//!
//! Default location: platform-specific data directories
//! - macOS: `~/Library/Application Support/clip-history/clipboard-history.json`
//! - Linux: `~/.local/share/clip-history/clipboard-history.json`
//! - Windows: `%APPDATA%\clip-history\clipboard-history.json`

pub mod file;
pub mod memory;

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Key holding the ordered history list
pub const HISTORY_KEY: &str = "history";
/// Key holding the configured capacity
pub const MAX_ITEMS_KEY: &str = "maxItems";
/// Capacity used when the store has none recorded
pub const DEFAULT_MAX_ITEMS: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store file {0} does not contain a JSON object")]
    Malformed(PathBuf),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Synchronous key-value blob store.
///
/// Implementations must give read-after-write consistency: a `get` issued after a
/// successful `set` on the same key observes the new value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Write several keys as one update. Either every key is written or, on error, none
    /// is. The default writes keys one at a time and so only suits stores whose `set`
    /// cannot fail part way; backends override it.
    fn set_many(&mut self, values: Vec<(&str, Value)>) -> Result<()> {
        for (key, value) in values {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Typed read falling back to `default` when the key is absent
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(default),
        }
    }

    /// Typed write
    fn set_value<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value)?;
        self.set(key, value)
    }
}
