//! PC Character Manager player crate.
//!
//! Application logic (character wizard, list view, character service),
//! outbound ports, infrastructure adapters and the terminal front-end.
//! The binary in `main.rs` is the only composition root.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod ui;

#[cfg(test)]
mod e2e_tests;
