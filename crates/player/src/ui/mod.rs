//! Terminal front-end: argument parsing, screens and prompts. Owns no
//! character rules; everything goes through the application layer.

pub mod cli;
pub mod error;
pub mod presentation;
pub mod routes;

pub use cli::{Cli, Commands, ListArgs};
pub use error::UiError;
pub use routes::{Route, Router};
