//! Boundary error plumbing.
//!
//! DESIGN
//! ======
//! Service errors are `thiserror` enums. At the HTTP boundary each maps to an
//! `ApiError`: an HTTP status plus a flat JSON body carrying a grepable
//! `code`, a human `message`, and a `retryable` flag. Error-specific fields
//! (e.g. `available` on an insufficient-stock rejection) are merged into the
//! same flat map, never nested.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

// =============================================================================
// FIELD CONSTANTS
// =============================================================================

/// Body key for the human-readable error message.
pub const ERROR_MESSAGE: &str = "message";

/// Body key for the grepable error code.
pub const ERROR_CODE: &str = "code";

/// Body key for the retryable flag.
pub const ERROR_RETRYABLE: &str = "retryable";

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured error responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// API ERROR
// =============================================================================

/// An HTTP error response with a flat structured body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: serde_json::Map<String, serde_json::Value>,
}

impl ApiError {
    /// Build an error response from a status, code, and message.
    #[must_use]
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        let mut body = serde_json::Map::new();
        body.insert(ERROR_CODE.into(), serde_json::Value::String(code.into()));
        body.insert(ERROR_MESSAGE.into(), serde_json::Value::String(message.into()));
        body.insert(ERROR_RETRYABLE.into(), serde_json::Value::Bool(false));
        Self { status, body }
    }

    /// Build an error response from a typed service error.
    #[must_use]
    pub fn from_error(status: StatusCode, err: &(impl ErrorCode + ?Sized)) -> Self {
        let mut body = serde_json::Map::new();
        body.insert(ERROR_CODE.into(), serde_json::Value::String(err.error_code().to_string()));
        body.insert(ERROR_MESSAGE.into(), serde_json::Value::String(err.to_string()));
        body.insert(ERROR_RETRYABLE.into(), serde_json::Value::Bool(err.retryable()));
        Self { status, body }
    }

    /// Merge an extra field into the flat body.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The grepable error code carried in the body.
    #[must_use]
    pub fn code(&self) -> &str {
        self.body
            .get(ERROR_CODE)
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.body.get(key)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::Value::Object(self.body))).into_response()
    }
}

// =============================================================================
// TESTS
// =============================================================================
