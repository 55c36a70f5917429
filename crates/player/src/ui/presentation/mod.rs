pub mod prompts;
pub mod views;
