//! Success banner that clears itself after a fixed delay.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::task::JoinHandle;

use crate::ports::outbound::SleepProvider;

pub const BANNER_DISMISS_MS: u64 = 5_000;

#[derive(Debug, Default)]
struct BannerState {
    message: Option<String>,
    generation: u64,
}

fn lock(state: &Mutex<BannerState>) -> MutexGuard<'_, BannerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A dismissal timer only clears the message it was scheduled for, and only
/// while the banner is still alive.
#[derive(Clone)]
pub struct SuccessBanner {
    state: Arc<Mutex<BannerState>>,
    sleeper: Arc<dyn SleepProvider>,
}

impl std::fmt::Debug for SuccessBanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuccessBanner")
            .field("message", &self.message())
            .finish()
    }
}

impl SuccessBanner {
    pub fn new(sleeper: Arc<dyn SleepProvider>) -> Self {
        Self {
            state: Arc::new(Mutex::new(BannerState::default())),
            sleeper,
        }
    }

    pub fn message(&self) -> Option<String> {
        lock(&self.state).message.clone()
    }

    /// Show `message` and schedule its dismissal. Must be called inside a
    /// tokio runtime.
    pub fn show(&self, message: impl Into<String>) -> JoinHandle<()> {
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.message = Some(message.into());
            state.generation
        };

        let weak: Weak<Mutex<BannerState>> = Arc::downgrade(&self.state);
        let delay = self.sleeper.sleep_ms(BANNER_DISMISS_MS);
        tokio::spawn(async move {
            delay.await;
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut state = lock(&state);
            if state.generation == generation {
                state.message = None;
            }
        })
    }

    pub fn dismiss(&self) {
        let mut state = lock(&self.state);
        state.generation += 1;
        state.message = None;
    }
}
