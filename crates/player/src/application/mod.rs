//! Application layer - Use cases and orchestration

pub mod error;
pub mod list;
pub mod services;
pub mod wizard;

pub use error::ServiceError;
