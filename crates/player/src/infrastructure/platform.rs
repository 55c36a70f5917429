//! Native platform implementations backed by the tokio runtime.

use std::{future::Future, pin::Pin};

use crate::ports::outbound::SleepProvider;

/// Tokio-backed sleep provider. Honours `tokio::time::pause` in tests.
///
/// The deadline is fixed when `sleep_ms` is called, not when the returned
/// future is first polled.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleepProvider;

impl SleepProvider for TokioSleepProvider {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        Box::pin(tokio::time::sleep(std::time::Duration::from_millis(ms)))
    }
}
