//! Infrastructure adapters: the reqwest character API client, the tokio
//! timer and the top-level panic boundary.

pub mod boundary;
pub mod http_client;
pub mod platform;

pub use boundary::{run_guarded, RecoveryScreen};
pub use http_client::ApiAdapter;
pub use platform::TokioSleepProvider;

#[cfg(test)]
pub mod testing;
