//! Fixed-interval clipboard polling.
//!
//! A [`Poller`] is an explicit, cancellable schedule. Owners either single-step it from
//! their own loop with [`Poller::tick_if_due`] (the TUI does this between key events) or
//! hand it the thread with [`Poller::run`] until a shutdown channel fires.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, select};
use tracing::debug;

use super::history::HistoryEngine;
use crate::clipboard::ClipboardAccess;
use crate::models::HistoryEntry;
use crate::store::KeyValueStore;

/// Default interval between clipboard reads
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Shortest interval accepted from configuration
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    /// `None` while stopped
    next_due: Option<Instant>,
}

impl Poller {
    /// Create a stopped poller
    pub fn new(interval: Duration) -> Self {
        Self { interval: interval.max(MIN_POLL_INTERVAL), next_due: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule the first tick one interval after `now`
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
        debug!(interval_ms = self.interval.as_millis() as u64, "poller started");
    }

    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            debug!("poller stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Time left until the next tick, or `None` when stopped
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Poll the engine if a tick is due at `now`. Returns the recorded entry, if any.
    pub fn tick_if_due<S, C>(
        &mut self,
        now: Instant,
        engine: &mut HistoryEngine<S, C>,
    ) -> Option<HistoryEntry>
    where
        S: KeyValueStore,
        C: ClipboardAccess,
    {
        let due = self.next_due.filter(|due| now >= *due)?;

        // Skip missed ticks instead of bursting to catch up
        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });

        engine.poll()
    }

    /// Block, polling on schedule until `shutdown` delivers. Returns the number of
    /// entries recorded. The poller is stopped on return.
    pub fn run<S, C, T>(&mut self, engine: &mut HistoryEngine<S, C>, shutdown: &Receiver<T>) -> usize
    where
        S: KeyValueStore,
        C: ClipboardAccess,
    {
        if !self.is_running() {
            self.start(Instant::now());
        }

        let mut recorded = 0;
        while let Some(wait) = self.time_until_next(Instant::now()) {
            select! {
                recv(shutdown) -> _ => break,
                default(wait) => {
                    if self.tick_if_due(Instant::now(), engine).is_some() {
                        recorded += 1;
                    }
                }
            }
        }

        self.stop();
        recorded
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}
