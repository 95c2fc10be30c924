//! TUI application state and event handling.
//!
//! The `App` owns the history engine and its poller and runs both on the UI thread:
//! each loop iteration ticks the poller when due, drains engine notifications into the
//! cached [`HistoryView`], redraws when dirty, and waits for a key until the next tick.
//!
//! - **Search**: case-insensitive substring filter over the cached view (never touches
//!   the store)
//! - **Actions**: copy, delete, and clear map 1:1 onto engine operations
//! - **Status messages**: transient feedback for clipboard and store operations
//! - **Dirty state tracking**: rendering only when state changes
//!
//! # Example
//!
//! ```rust,ignore
//! let engine = HistoryEngine::new(store, SystemClipboard::new()?);
//! let mut app = App::new(engine, Poller::default())?;
//! app.run(&mut terminal)?;
//! ```

use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::Receiver;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, info};

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::ClipboardAccess;
use crate::engine::{HistoryEngine, HistoryEvent, Poller};
use crate::models::HistoryEntry;
use crate::presentation::HistoryView;
use crate::store::KeyValueStore;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest wait for input before re-checking timers and redrawing
const MAX_INPUT_WAIT: Duration = Duration::from_millis(100);
/// Search input limit
const MAX_QUERY_LEN: usize = 256;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App<S, C> {
    engine: HistoryEngine<S, C>,
    poller: Poller,
    events: Receiver<HistoryEvent>,
    view: HistoryView,
    max_items: usize,
    selected_idx: usize,
    search_query: String,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<S: KeyValueStore, C: ClipboardAccess> App<S, C> {
    pub fn new(mut engine: HistoryEngine<S, C>, poller: Poller) -> Result<Self> {
        let events = engine.subscribe();
        let max_items = engine.max_items()?;
        let view = HistoryView::new(engine.history()?, max_items);

        Ok(Self {
            engine,
            poller,
            events,
            view,
            max_items,
            selected_idx: 0,
            search_query: String::new(),
            should_quit: false,
            status_message: None,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        })
    }

    /// Hand the engine back, e.g. after the UI exits
    pub fn into_engine(self) -> HistoryEngine<S, C> {
        self.engine
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// Apply every pending engine notification to the cached view
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if let HistoryEvent::ClipboardChanged(entry) = &event {
                debug!(id = %entry.id, "new clipboard entry");
            }
            self.view.apply(event);
            self.clamp_selection();
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.engine.prime();
        self.poller.start(Instant::now());
        info!("monitoring clipboard");

        let result = self.event_loop(terminal);

        self.poller.stop();
        info!("stopped monitoring clipboard");
        result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            self.poller.tick_if_due(Instant::now(), &mut self.engine);
            self.drain_events();

            // Draw if dirty or if it's been >100ms (relative ages and terminal resize)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= MAX_INPUT_WAIT {
                let matched = self.matched_entries();
                terminal.draw(|f| {
                    let state = RenderState {
                        search_query: &self.search_query,
                        total_count: self.view.len(),
                        max_items: self.max_items,
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &matched, self.selected_idx, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let wait = self
                .poller
                .time_until_next(Instant::now())
                .map_or(MAX_INPUT_WAIT, |until_tick| until_tick.min(MAX_INPUT_WAIT));
            let action = poll_event(wait)?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Entries matching the current search, in list order
    fn matched_entries(&self) -> Vec<&HistoryEntry> {
        self.view.filtered(&self.search_query)
    }

    fn selected_entry(&self) -> Option<HistoryEntry> {
        self.matched_entries().get(self.selected_idx).map(|entry| (*entry).clone())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        let total_items = self.matched_entries().len();

        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearSearch => {
                if self.search_query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_query.clear();
                    self.selected_idx = 0;
                    self.needs_redraw = true;
                }
            }
            Action::MoveUp => self.move_selection(-1, total_items),
            Action::MoveDown => self.move_selection(1, total_items),
            Action::PageUp => self.move_selection(-10, total_items),
            Action::PageDown => self.move_selection(10, total_items),
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::CopySelected => self.copy_selected(),
            Action::DeleteSelected => self.delete_selected(),
            Action::ClearHistory => self.clear_history(),
            Action::None => {}
        }
    }

    fn copy_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            self.set_error("✗ No entry to copy");
            return;
        };

        match self.engine.write_and_suppress(&entry.text) {
            Ok(()) => self.set_status(
                "✓ Copied to clipboard",
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            ),
            Err(e) => self.set_error(format!("✗ Clipboard error: {}", e)),
        }
    }

    fn delete_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            self.set_error("✗ No entry to delete");
            return;
        };

        match self.engine.delete(&entry.id) {
            Ok(list) => {
                self.view.replace(list);
                self.clamp_selection();
                self.set_status("✓ Entry deleted", MessageType::Success, STATUS_SUCCESS_DURATION_MS);
            }
            Err(e) => self.set_error(format!("✗ Could not delete: {}", e)),
        }
    }

    fn clear_history(&mut self) {
        if self.view.is_empty() {
            return;
        }

        match self.engine.clear() {
            Ok(list) => {
                self.view.replace(list);
                self.selected_idx = 0;
                self.set_status("✓ History cleared", MessageType::Success, STATUS_SUCCESS_DURATION_MS);
            }
            Err(e) => self.set_error(format!("✗ Could not clear history: {}", e)),
        }
    }

    fn move_selection(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    /// Keep the selection inside the matched range after the list shrinks
    fn clamp_selection(&mut self) {
        let total = self.matched_entries().len();
        self.selected_idx = self.selected_idx.min(total.saturating_sub(1));
    }

    fn update_search(&mut self, c: char) {
        if self.search_query.chars().count() < MAX_QUERY_LEN {
            self.search_query.push(c);
            self.selected_idx = 0; // Reset selection on search change
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.selected_idx = 0;
            self.needs_redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::store::MemoryStore;

    type TestApp = App<MemoryStore, MemoryClipboard>;

    fn app_with(texts: &[&str]) -> TestApp {
        let mut engine = HistoryEngine::new(MemoryStore::new(), MemoryClipboard::new());
        // Insert oldest first so the list reads in the given order
        for text in texts.iter().rev() {
            engine.insert(text).unwrap();
        }
        App::new(engine, Poller::default()).unwrap()
    }

    fn view_texts(app: &TestApp) -> Vec<String> {
        app.view.entries().iter().map(|e| e.text.clone()).collect()
    }

    #[test]
    fn test_app_new_initializes_state() {
        let app = app_with(&["a", "b"]);

        assert_eq!(app.selected_idx, 0);
        assert_eq!(app.search_query, "");
        assert!(!app.should_quit);
        assert!(app.needs_redraw);
        assert_eq!(view_texts(&app), vec!["a", "b"]);
        assert_eq!(app.max_items, 50);
    }

    #[test]
    fn test_move_selection_bounds() {
        let mut app = app_with(&["a", "b"]);

        app.move_selection(-10, 2);
        assert_eq!(app.selected_idx, 0);

        app.move_selection(10, 2);
        assert_eq!(app.selected_idx, 1);
    }

    #[test]
    fn test_move_selection_with_empty_results() {
        let mut app = app_with(&[]);
        app.handle_action(Action::MoveDown);
        assert_eq!(app.selected_idx, 0);
    }

    #[test]
    fn test_handle_action_page_navigation() {
        let texts: Vec<String> = (0..15).map(|i| format!("entry {}", i)).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut app = app_with(&refs);

        app.handle_action(Action::PageDown);
        assert_eq!(app.selected_idx, 10);

        app.handle_action(Action::PageDown);
        assert_eq!(app.selected_idx, 14);

        app.handle_action(Action::PageUp);
        assert_eq!(app.selected_idx, 4);
    }

    #[test]
    fn test_quit_and_clear_search() {
        let mut app = app_with(&["a"]);
        app.search_query = "query".to_string();

        app.handle_action(Action::ClearSearch);
        assert!(!app.should_quit);
        assert_eq!(app.search_query, "");

        app.handle_action(Action::ClearSearch);
        assert!(app.should_quit);
    }

    #[test]
    fn test_search_filters_without_touching_store() {
        let mut app = app_with(&["Apple pie", "banana", "APPLE juice"]);
        let writes = app.engine.store().write_count();

        for c in "apple".chars() {
            app.handle_action(Action::UpdateSearch(c));
        }

        let matched: Vec<&str> = app.matched_entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(matched, vec!["Apple pie", "APPLE juice"]);
        assert_eq!(app.engine.store().write_count(), writes);
        assert_eq!(app.engine.history().unwrap().len(), 3);
    }

    #[test]
    fn test_search_query_length_limit() {
        let mut app = app_with(&[]);

        for _ in 0..MAX_QUERY_LEN {
            app.update_search('a');
        }
        app.update_search('b');

        assert_eq!(app.search_query.len(), MAX_QUERY_LEN);
        assert!(!app.search_query.contains('b'));
    }

    #[test]
    fn test_search_query_limit_counts_characters() {
        let mut app = app_with(&[]);

        for _ in 0..MAX_QUERY_LEN {
            app.update_search('é');
        }
        app.update_search('z');

        assert_eq!(app.search_query.chars().count(), MAX_QUERY_LEN);
        assert_eq!(app.search_query.len(), MAX_QUERY_LEN * 2);
        assert!(!app.search_query.contains('z'));
    }

    #[test]
    fn test_delete_char() {
        let mut app = app_with(&[]);
        app.search_query = "test".to_string();

        app.handle_action(Action::DeleteChar);
        assert_eq!(app.search_query, "tes");

        app.search_query.clear();
        app.handle_action(Action::DeleteChar);
        assert_eq!(app.search_query, "");
    }

    #[test]
    fn test_copy_selected_suppresses_rerecording() {
        let mut app = app_with(&["newest", "older"]);
        app.handle_action(Action::MoveDown);

        app.handle_action(Action::CopySelected);

        assert_eq!(app.engine.clipboard().text(), "older");
        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.text, "✓ Copied to clipboard");

        // The engine's own write is not recorded on the next poll
        assert!(app.engine.poll().is_none());
        app.drain_events();
        assert_eq!(view_texts(&app), vec!["newest", "older"]);
    }

    #[test]
    fn test_copy_with_no_entries() {
        let mut app = app_with(&[]);

        app.handle_action(Action::CopySelected);

        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.text, "✗ No entry to copy");
        assert_eq!(msg.message_type, MessageType::Error);
    }

    #[test]
    fn test_copy_clipboard_failure_reports_error() {
        let mut app = app_with(&["a"]);
        app.engine.clipboard_mut().set_fail_writes(true);

        app.handle_action(Action::CopySelected);

        let msg = app.status_message.as_ref().unwrap();
        assert!(msg.text.starts_with("✗ Clipboard error:"));
        assert_eq!(msg.message_type, MessageType::Error);
    }

    #[test]
    fn test_copy_respects_search_selection() {
        let mut app = app_with(&["alpha", "beta", "gamma"]);
        app.search_query = "gam".to_string();

        app.handle_action(Action::CopySelected);

        assert_eq!(app.engine.clipboard().text(), "gamma");
    }

    #[test]
    fn test_delete_selected() {
        let mut app = app_with(&["a", "b", "c"]);
        app.selected_idx = 2;

        app.handle_action(Action::DeleteSelected);

        assert_eq!(view_texts(&app), vec!["a", "b"]);
        assert_eq!(app.selected_idx, 1);
        let stored: Vec<String> =
            app.engine.history().unwrap().into_iter().map(|e| e.text).collect();
        assert_eq!(stored, vec!["a", "b"]);
    }

    #[test]
    fn test_delete_store_failure_keeps_view() {
        let mut app = app_with(&["a", "b"]);
        app.engine.store_mut().set_fail_writes(true);

        app.handle_action(Action::DeleteSelected);

        assert_eq!(view_texts(&app), vec!["a", "b"]);
        assert_eq!(app.status_message.as_ref().unwrap().message_type, MessageType::Error);
    }

    #[test]
    fn test_clear_history() {
        let mut app = app_with(&["a", "b"]);
        app.selected_idx = 1;

        app.handle_action(Action::ClearHistory);

        assert!(app.view.is_empty());
        assert_eq!(app.selected_idx, 0);
        assert!(app.engine.history().unwrap().is_empty());
    }

    #[test]
    fn test_poll_tick_updates_view() {
        let mut app = app_with(&["existing"]);
        app.engine.clipboard_mut().set_external("fresh copy");
        let start = Instant::now();
        app.poller.start(start);

        let due = start + app.poller.interval();
        app.poller.tick_if_due(due, &mut app.engine);
        app.drain_events();

        assert_eq!(view_texts(&app), vec!["fresh copy", "existing"]);
    }

    #[test]
    fn test_status_message_expiry() {
        let mut app = app_with(&[]);

        app.set_status("Expired", MessageType::Success, 0);
        std::thread::sleep(Duration::from_millis(1));
        app.check_and_clear_expired_status();
        assert!(app.status_message.is_none());

        app.set_status("Active", MessageType::Success, 10_000);
        app.check_and_clear_expired_status();
        assert_eq!(app.status_message.as_ref().unwrap().text, "Active");
    }

    #[test]
    fn test_into_engine_returns_state() {
        let app = app_with(&["kept"]);
        let engine = app.into_engine();
        assert_eq!(engine.history().unwrap().len(), 1);
    }
}
