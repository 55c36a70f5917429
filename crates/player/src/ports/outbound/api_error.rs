//! Uniform error shape for every failed call across the API boundary.

use serde_json::Value;

use pcm_shared::{ErrorBody, ServerFieldError};

/// Status reported for failures that carry none (transport errors).
pub const DEFAULT_STATUS: u16 = 500;

/// Message used when neither the server nor the transport supplied one.
pub const DEFAULT_MESSAGE: &str = "An unexpected error occurred";

/// A failed API call.
///
/// `status` is `None` when the request never produced an HTTP response
/// (connection refused, timeout). `details` holds the raw response body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub details: Option<Value>,
}

impl ApiError {
    /// The request did not reach the server or no response arrived.
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.trim().is_empty() {
                DEFAULT_MESSAGE.to_string()
            } else {
                message
            },
            status: None,
            details: None,
        }
    }

    /// A non-success HTTP response. The message comes from the body's
    /// `message`, then its `error`, then `fallback`.
    pub fn from_response(status: u16, body: Option<Value>, fallback: impl Into<String>) -> Self {
        let parsed = body
            .as_ref()
            .and_then(|b| serde_json::from_value::<ErrorBody>(b.clone()).ok())
            .unwrap_or_default();
        let fallback = fallback.into();
        let message = match parsed.headline() {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ if !fallback.trim().is_empty() => fallback,
            _ => DEFAULT_MESSAGE.to_string(),
        };
        Self {
            message,
            status: Some(status),
            details: body,
        }
    }

    /// The numeric status, defaulting to 500 when absent.
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(DEFAULT_STATUS)
    }

    pub fn is_transport(&self) -> bool {
        self.status.is_none()
    }

    /// Concurrent modification on update.
    pub fn is_conflict(&self) -> bool {
        self.status == Some(409)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status, Some(s) if (400..500).contains(&s))
    }

    /// Structured field rejections from a 4xx body, if any.
    pub fn field_errors(&self) -> Vec<ServerFieldError> {
        self.details
            .as_ref()
            .and_then(|d| serde_json::from_value::<ErrorBody>(d.clone()).ok())
            .and_then(|b| b.errors)
            .unwrap_or_default()
    }
}
