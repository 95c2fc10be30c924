use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::models::HistoryEntry;

/// Change notifications pushed from the engine to its subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A new entry was recorded at the front of the list
    ClipboardChanged(HistoryEntry),
    /// The list was replaced wholesale (clear, delete, capacity change)
    HistoryUpdated(Vec<HistoryEntry>),
}

/// Fan-out of events to any number of channel subscribers
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<HistoryEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<HistoryEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver to every live subscriber; dropped receivers are pruned
    pub fn emit(&mut self, event: HistoryEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
