//! Front-end error type.

use pcm_domain::DomainError;

use crate::application::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("{0}")]
    InvalidInput(#[from] DomainError),
}
