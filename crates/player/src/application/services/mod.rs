//! Application services
//!
//! Services wrap the object-safe [`RawApiPort`](crate::ports::outbound::RawApiPort)
//! and own the typed conversions between domain values and wire payloads.

pub mod character_service;

pub use character_service::{CharacterService, CHARACTERS_PATH, HEALTH_PATH};
