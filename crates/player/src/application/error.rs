//! Service layer error types

use pcm_domain::DomainError;

use crate::ports::outbound::ApiError;

/// Errors that can occur in service operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// Rejected locally before any request was sent
    #[error("{0}")]
    InvalidInput(#[from] DomainError),
    /// The API call failed (transport or non-success status)
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Failed to parse response data
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ServiceError {
    pub fn parse(e: impl ToString) -> Self {
        Self::ParseError(e.to_string())
    }

    /// The API error, if the failure crossed the network boundary.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            ServiceError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.api().is_some_and(ApiError::is_not_found)
    }

    /// Check if this is a concurrent-modification conflict
    pub fn is_conflict(&self) -> bool {
        self.api().is_some_and(ApiError::is_conflict)
    }

    /// HTTP status when the server answered; 500 for transport failures.
    pub fn status(&self) -> Option<u16> {
        self.api().map(ApiError::status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_api_failures() {
        let err = ServiceError::from(ApiError::from_response(409, None, "Conflict"));
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(409));

        let err = ServiceError::from(ApiError::transport("refused"));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn local_failures_carry_no_status() {
        let err = ServiceError::from(DomainError::missing_field("race"));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Missing required field: race");
    }
}
