//! reqwest client for the character API.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::config::{ApiConfig, API_TIMEOUT_SECS, DEFAULT_API_BASE_URL};
use crate::ports::outbound::{ApiError, RawApiPort};

/// JSON-over-HTTP adapter implementing [`RawApiPort`].
///
/// Clones share the bearer token, so setting it on one handle affects every
/// service holding a clone.
#[derive(Clone)]
pub struct ApiAdapter {
    client: Client,
    base_url: String,
    auth_token: Arc<RwLock<Option<String>>>,
}

impl ApiAdapter {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, API_TIMEOUT_SECS)
    }

    /// Create client with custom timeout (for testing).
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_timeout(&config.base_url, config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `Authorization: Bearer <token>` on every subsequent request.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.auth_token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear_auth_token(&self) {
        if let Ok(mut slot) = self.auth_token.write() {
            *slot = None;
        }
    }

    fn auth_token(&self) -> Option<String> {
        self.auth_token.read().ok().and_then(|slot| slot.clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match self.auth_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and normalise. A successful empty body yields `Value::Null`.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut builder = self.request(method.clone(), path);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %method, path, "API request");

        let response = builder.send().await.map_err(|e| {
            tracing::error!(method = %method, path, error = %e, "API request failed to send");
            ApiError::transport(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        if !status.is_success() {
            let err = ApiError::from_response(
                status.as_u16(),
                serde_json::from_str::<Value>(&text).ok(),
                format!("Request failed with status code {}", status.as_u16()),
            );
            if status == StatusCode::BAD_REQUEST {
                let field_errors = err.field_errors();
                if !field_errors.is_empty() {
                    tracing::warn!(path, errors = ?field_errors, "Validation errors");
                }
            }
            tracing::debug!(
                method = %method,
                path,
                status = status.as_u16(),
                error = %err,
                "API error response"
            );
            return Err(err);
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            ApiError::from_response(status.as_u16(), None, format!("Invalid JSON response: {}", e))
        })
    }
}

impl Default for ApiAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[async_trait]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(Method::GET, path, None).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.execute(Method::POST, path, Some(body)).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.execute(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None).await.map(|_| ())
    }
}
