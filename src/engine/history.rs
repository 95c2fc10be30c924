//! The history engine: change detection, recording, and list mutation.
//!
//! The engine holds no copy of the list between calls. Each operation loads the list from
//! the store, applies the policy in [`super::policy`] to a local copy, and writes the final
//! result back, so callers never observe an intermediate state.

use crossbeam_channel::Receiver;
use tracing::{debug, info, warn};

use super::events::{EventBus, HistoryEvent};
use super::policy::{insert_front, remove_by_id};
use crate::clipboard::{ClipboardAccess, copy_with};
use crate::error::{HistoryError, Result};
use crate::models::HistoryEntry;
use crate::store::{DEFAULT_MAX_ITEMS, HISTORY_KEY, KeyValueStore, MAX_ITEMS_KEY, StoreError};

pub struct HistoryEngine<S, C> {
    store: S,
    clipboard: C,
    /// Last clipboard text seen by a poll or written by the engine itself
    last_observed: String,
    events: EventBus,
}

impl<S: KeyValueStore, C: ClipboardAccess> HistoryEngine<S, C> {
    pub fn new(store: S, clipboard: C) -> Self {
        Self { store, clipboard, last_observed: String::new(), events: EventBus::new() }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    pub fn last_observed(&self) -> &str {
        &self.last_observed
    }

    /// Subscribe to change notifications
    pub fn subscribe(&mut self) -> Receiver<HistoryEvent> {
        self.events.subscribe()
    }

    /// Current persisted list, most recent first
    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.store.get_or(HISTORY_KEY, Vec::new())?)
    }

    /// Configured capacity (never less than 1). A stored value that is not an integer is
    /// ignored in favour of the default.
    pub fn max_items(&self) -> Result<usize> {
        let Some(value) = self.store.get(MAX_ITEMS_KEY)? else {
            return Ok(DEFAULT_MAX_ITEMS);
        };

        if let Some(max) = value.as_u64() {
            return Ok(usize::try_from(max).unwrap_or(usize::MAX).max(1));
        }
        if value.as_i64().is_some() {
            // Negative
            return Ok(1);
        }

        warn!(%value, "stored max items is not an integer, using default");
        Ok(DEFAULT_MAX_ITEMS)
    }

    /// Persist a new capacity, truncating the stored list if it no longer fits.
    ///
    /// On failure the store keeps its previous list and capacity.
    pub fn set_max_items(&mut self, max_items: usize) -> Result<Vec<HistoryEntry>> {
        if max_items == 0 {
            return Err(HistoryError::InvalidArgument("max items must be at least 1".to_string()));
        }

        let previous = self.history()?;
        if previous.len() <= max_items {
            self.store.set_value(MAX_ITEMS_KEY, &max_items)?;
            return Ok(previous);
        }

        let list: Vec<HistoryEntry> = previous.into_iter().take(max_items).collect();
        let history = serde_json::to_value(&list).map_err(StoreError::from)?;
        self.store.set_many(vec![(HISTORY_KEY, history), (MAX_ITEMS_KEY, max_items.into())])?;

        info!(max_items, "history truncated to new capacity");
        self.events.emit(HistoryEvent::HistoryUpdated(list.clone()));
        Ok(list)
    }

    /// Remember the current clipboard contents without recording them, so text copied
    /// before monitoring started is not treated as a new copy.
    pub fn prime(&mut self) {
        match self.clipboard.read_text() {
            Ok(text) => self.last_observed = text,
            Err(e) => warn!(error = %e, "could not read clipboard while priming"),
        }
    }

    /// One polling cycle. Failures are logged and absorbed; the next cycle retries.
    pub fn poll(&mut self) -> Option<HistoryEntry> {
        let candidate = match self.clipboard.read_text() {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "clipboard read failed, skipping poll");
                return None;
            }
        };

        match self.record_if_changed(&candidate) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "failed to record clipboard change");
                None
            }
        }
    }

    /// Record `candidate` if it is non-blank and differs from the last observed text.
    pub fn record_if_changed(&mut self, candidate: &str) -> Result<Option<HistoryEntry>> {
        if candidate.trim().is_empty() || candidate == self.last_observed {
            return Ok(None);
        }

        let previous = std::mem::replace(&mut self.last_observed, candidate.to_string());
        match self.insert(candidate) {
            Ok(entry) => {
                info!(id = %entry.id, chars = entry.char_count(), "recorded clipboard change");
                self.events.emit(HistoryEvent::ClipboardChanged(entry.clone()));
                Ok(Some(entry))
            }
            Err(e) => {
                self.last_observed = previous;
                Err(e)
            }
        }
    }

    /// Insert `text` at the front, replacing any entry with the same text.
    pub fn insert(&mut self, text: &str) -> Result<HistoryEntry> {
        if text.trim().is_empty() {
            return Err(HistoryError::InvalidArgument("cannot record blank text".to_string()));
        }

        let mut list = self.history()?;
        let max_items = self.max_items()?;

        let entry = HistoryEntry::new(text);
        insert_front(&mut list, entry.clone(), max_items);
        self.store.set_value(HISTORY_KEY, &list)?;

        debug!(id = %entry.id, chars = entry.char_count(), len = list.len(), "recorded entry");
        Ok(entry)
    }

    /// Delete the entry with `id`. An unknown id is a no-op.
    pub fn delete(&mut self, id: &str) -> Result<Vec<HistoryEntry>> {
        let mut list = self.history()?;

        if remove_by_id(&mut list, id) {
            self.store.set_value(HISTORY_KEY, &list)?;
            debug!(id, "deleted entry");
            self.events.emit(HistoryEvent::HistoryUpdated(list.clone()));
        }

        Ok(list)
    }

    /// Remove every entry
    pub fn clear(&mut self) -> Result<Vec<HistoryEntry>> {
        let empty: Vec<HistoryEntry> = Vec::new();
        self.store.set_value(HISTORY_KEY, &empty)?;
        info!("history cleared");
        self.events.emit(HistoryEvent::HistoryUpdated(Vec::new()));
        Ok(empty)
    }

    /// Write `text` to the clipboard and mark it as observed so the next poll does not
    /// record the engine's own write as a new copy.
    pub fn write_and_suppress(&mut self, text: &str) -> Result<()> {
        copy_with(&mut self.clipboard, text)?;
        self.last_observed = text.to_string();
        Ok(())
    }
}
