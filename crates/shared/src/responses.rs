//! Response envelopes returned by the character API.

use serde::{Deserialize, Serialize};

/// `{ "data": ... }` envelope used by single-entity endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
            success: Some(true),
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// A field-level rejection reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFieldError {
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Error body shapes the server may return. Every field is optional;
/// `message` wins over `error` when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ServerFieldError>>,
}

impl ErrorBody {
    pub fn headline(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paginated_response_reads_camel_case() {
        let page: PaginatedResponse<serde_json::Value> = serde_json::from_value(json!({
            "data": [{"id": 1}],
            "total": 41,
            "page": 3,
            "limit": 20,
            "totalPages": 3
        }))
        .expect("deserialize");
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 1);
    }

    #[test]
    fn error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_value(json!({"message": "bad", "error": "worse"})).expect("body");
        assert_eq!(body.headline(), Some("bad"));

        let body: ErrorBody =
            serde_json::from_value(json!({"error": "Character not found"})).expect("body");
        assert_eq!(body.headline(), Some("Character not found"));

        let body: ErrorBody = serde_json::from_value(json!({
            "errors": [{"field": "level", "message": "too high", "code": "max"}]
        }))
        .expect("body");
        assert_eq!(body.headline(), None);
        assert_eq!(body.errors.map(|e| e.len()), Some(1));
    }
}
