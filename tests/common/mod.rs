//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use tempfile::TempDir;

use clip_history::HistoryEntry;

/// Builder for a temporary history store file
pub struct StoreBuilder {
    temp_dir: TempDir,
    entries: Vec<HistoryEntry>,
    max_items: Option<usize>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, entries: Vec::new(), max_items: None }
    }

    /// Directory holding the store (also usable as `CLIP_HISTORY_DIR`)
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.temp_dir.path().join("clipboard-history.json")
    }

    /// Append an entry; entries are listed in the order added (most recent first)
    pub fn with_entry(mut self, entry: HistoryEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append entries for each text, spaced one minute apart going back in time
    pub fn with_texts(mut self, texts: &[&str]) -> Self {
        let start = base_time();
        for (i, text) in texts.iter().enumerate() {
            let timestamp = start - Duration::minutes(i as i64);
            self.entries.push(HistoryEntry::with_timestamp(*text, timestamp));
        }
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Write the store file and return the builder (which owns the temp dir)
    pub fn build(self) -> Self {
        let mut object = json!({ "history": self.entries });
        if let Some(max_items) = self.max_items {
            object["maxItems"] = json!(max_items);
        }
        let contents = serde_json::to_string_pretty(&object).expect("Failed to serialize store");
        fs::write(self.store_path(), contents).expect("Failed to write store file");
        self
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Read back the raw JSON document
    pub fn read_json(&self) -> serde_json::Value {
        let contents = fs::read_to_string(self.store_path()).expect("Failed to read store file");
        serde_json::from_str(&contents).expect("Store file is not valid JSON")
    }

    /// Texts of the persisted history, in stored order
    pub fn stored_texts(&self) -> Vec<String> {
        self.read_json()["history"]
            .as_array()
            .map(|list| {
                list.iter().filter_map(|e| e["text"].as_str().map(str::to_string)).collect()
            })
            .unwrap_or_default()
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed reference time used for seeded entries
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}
