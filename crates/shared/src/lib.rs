//! PC Character Manager Protocol - wire contracts for the character API
//!
//! This crate contains the request and response shapes exchanged with the
//! character persistence service.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and the domain vocabulary
//! 2. **No I/O** - Pure data types and draft-to-payload mapping
//! 3. **Server schema lives here** - the wizard's draft shape stays in the domain

pub mod requests;
pub mod responses;

pub use requests::{
    AbilityScoreInput, CreateCharacterPayload, ListCharactersParams, SortField, SortOrder,
    UpdateCharacterPayload, MAX_SENDABLE_SCORE, MIN_SENDABLE_SCORE,
};
pub use responses::{DataResponse, ErrorBody, HealthResponse, PaginatedResponse, ServerFieldError};
