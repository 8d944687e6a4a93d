//! API error handling for the imgdrop HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::ImgdropError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Payload too large (413).
    PayloadTooLarge,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a payload too large error.
    pub fn payload_too_large(max_bytes: u64) -> Self {
        let limit = if max_bytes >= 1024 * 1024 {
            format!("{}MB", max_bytes / 1024 / 1024)
        } else {
            format!("{max_bytes} bytes")
        };
        Self::new(
            ErrorCode::PayloadTooLarge,
            format!("File too large (max {limit})"),
        )
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ImgdropError> for ApiError {
    fn from(err: ImgdropError) -> Self {
        match err {
            ImgdropError::Validation(msg) => ApiError::bad_request(msg),
            ImgdropError::TooLarge(max_bytes) => ApiError::payload_too_large(max_bytes),
            ImgdropError::NotFound(_) | ImgdropError::InvalidName(_) => {
                ApiError::not_found("File not found")
            }
            other => {
                tracing::error!("Internal error: {}", other);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_payload_too_large_message() {
        let err = ApiError::payload_too_large(5 * 1024 * 1024);
        assert_eq!(err.code(), ErrorCode::PayloadTooLarge);
        assert_eq!(err.message(), "File too large (max 5MB)");

        let err = ApiError::payload_too_large(16);
        assert_eq!(err.message(), "File too large (max 16 bytes)");
    }

    #[test]
    fn test_from_domain_errors() {
        let err: ApiError = ImgdropError::Validation("File type not allowed".into()).into();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "File type not allowed");

        let err: ApiError = ImgdropError::NotFound("File: x.png".into()).into();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err: ApiError = ImgdropError::InvalidName("../x".into()).into();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err: ApiError = ImgdropError::StoreUnavailable("down".into()).into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "An internal error occurred");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        use http_body_util::BodyExt;

        let response = ApiError::bad_request("No file part").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "No file part" }));
    }
}
