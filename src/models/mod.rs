//! Data models for recorded clipboard history.
//!
//! - [`HistoryEntry`] - One recorded clipboard value with its id, timestamp and preview
//!
//! Entries serialize with serde into the persisted `history` array; timestamps are
//! written as ISO-8601 strings by chrono.

pub mod entry;

pub use entry::{HistoryEntry, PREVIEW_CHARS, PREVIEW_ELLIPSIS, make_preview};
