//! Clip History - Record and browse clipboard text history
//!
//! This library watches the system clipboard and keeps a bounded, most-recent-first list of
//! the text that passed through it. It provides:
//!
//! - A history engine that deduplicates entries and enforces a capacity limit
//! - A pluggable key-value store, with a JSON file backend for persistence
//! - A clipboard abstraction over the OS clipboard, with an in-memory fake for tests
//! - A fixed-interval poller that records changes as they appear
//! - Search and display helpers, plus an interactive terminal UI
//!
//! # Example
//!
//! ```
//! use clip_history::{HistoryEngine, MemoryClipboard, MemoryStore};
//!
//! let mut engine = HistoryEngine::new(MemoryStore::new(), MemoryClipboard::new());
//! engine.insert("alpha")?;
//! engine.insert("beta")?;
//! engine.insert("alpha")?;
//!
//! let texts: Vec<_> = engine.history()?.into_iter().map(|e| e.text).collect();
//! assert_eq!(texts, ["alpha", "beta"]);
//! # Ok::<(), clip_history::HistoryError>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod store;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use clipboard::{ClipboardAccess, MemoryClipboard, SystemClipboard, copy_to_clipboard};
pub use engine::{HistoryEngine, HistoryEvent, Poller};
pub use error::HistoryError;
pub use models::HistoryEntry;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
