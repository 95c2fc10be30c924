use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of characters kept in an entry preview
pub const PREVIEW_CHARS: usize = 100;

/// Marker appended to truncated previews
pub const PREVIEW_ELLIPSIS: &str = "...";

/// A single recorded clipboard value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub preview: String,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time and a fresh id
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_timestamp(text, Utc::now())
    }

    pub fn with_timestamp(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let text = text.into();
        let preview = make_preview(&text);
        Self { id: Uuid::new_v4().to_string(), text, timestamp, preview }
    }

    /// Length of the full text in characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Build the truncated preview stored alongside an entry.
///
/// Counts Unicode scalar values, so multibyte text is never split mid-character.
pub fn make_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], PREVIEW_ELLIPSIS),
        None => text.to_string(),
    }
}
