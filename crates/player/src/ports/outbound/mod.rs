//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the character API and the
//! runtime without depending on concrete implementations.

pub mod api_error;
pub mod platform;
pub mod raw_api_port;

pub use api_error::ApiError;
pub use platform::SleepProvider;
pub use raw_api_port::RawApiPort;

#[cfg(any(test, feature = "testing"))]
pub use raw_api_port::MockRawApiPort;
