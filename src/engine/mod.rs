//! Clipboard history engine.
//!
//! - [`HistoryEngine`] - change detection, dedup, ordering, capacity, delete and clear
//! - [`Poller`] - explicit fixed-interval schedule that drives [`HistoryEngine::poll`]
//! - [`HistoryEvent`] - notifications pushed to subscribers over channels
//! - [`policy`] - the list rules, shared with presentation caches

pub mod events;
pub mod history;
pub mod policy;
pub mod poller;

pub use events::{EventBus, HistoryEvent};
pub use history::HistoryEngine;
pub use poller::{DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL, Poller};
