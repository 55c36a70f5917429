//! Platform abstraction ports
//!
//! Timers are the only platform service the application layer needs: the
//! search debounce and the banner auto-dismiss both wait through this trait
//! so tests can drive them with a paused clock.

use std::{future::Future, pin::Pin};

/// Async sleep abstraction
pub trait SleepProvider: Send + Sync + 'static {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
}
