//! Trailing-edge debouncer for search input.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::ports::outbound::SleepProvider;

/// Delay between the last keystroke and the search request.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Each call takes a generation number and waits out the delay; only the
/// call still holding the latest generation when it wakes gets its value
/// back. Clones share the generation counter.
#[derive(Clone)]
pub struct Debouncer {
    delay_ms: u64,
    generation: Arc<AtomicU64>,
    sleeper: Arc<dyn SleepProvider>,
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay_ms", &self.delay_ms)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}

impl Debouncer {
    pub fn new(delay_ms: u64, sleeper: Arc<dyn SleepProvider>) -> Self {
        Self {
            delay_ms,
            generation: Arc::new(AtomicU64::new(0)),
            sleeper,
        }
    }

    pub fn search(sleeper: Arc<dyn SleepProvider>) -> Self {
        Self::new(SEARCH_DEBOUNCE_MS, sleeper)
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// `Some(value)` once the delay passes with no newer call, `None` if a
    /// later call or [`cancel`](Self::cancel) superseded this one.
    pub async fn debounce<T>(&self, value: T) -> Option<T> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.sleeper.sleep_ms(self.delay_ms).await;
        (self.generation.load(Ordering::SeqCst) == ticket).then_some(value)
    }

    /// Drop any pending value.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
