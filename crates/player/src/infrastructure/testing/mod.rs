//! Shared fixtures for unit and end-to-end tests.

pub mod fixtures;
