//! # REST API Errors
//!
//! Every failure a handler can produce, and the fixed table that maps each
//! one to an HTTP status. Bodies are always `{"message": string}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Event;
use crate::shoe::{InvalidShoeId, MissingField};
use crate::store::StoreError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned for every internal error
pub const INTERNAL_ERROR_MESSAGE: &str = "An unknown error occurred";

/// REST API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path identifier is not a well-formed shoe id
    #[error("Invalid shoe id")]
    InvalidIdentifier,

    /// Required attribute absent from create/update input
    #[error("{0}")]
    MissingField(#[from] MissingField),

    /// Body could not be parsed into shoe input
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// No shoe for a well-formed id
    #[error("Shoe not found")]
    NotFound,

    /// No route for method + path
    #[error("Endpoint not found")]
    EndpointNotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Backend failure; detail is logged, never returned
    #[error("An unknown error occurred")]
    Internal(#[source] StoreError),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::InvalidIdentifier => StatusCode::BAD_REQUEST,
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::EndpointNotFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err)
    }
}

impl From<InvalidShoeId> for ApiError {
    fn from(_: InvalidShoeId) -> Self {
        ApiError::InvalidIdentifier
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::InvalidIdentifier
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self::new(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            tracing::error!(event = %Event::RequestFailed, error = %source, "internal error");
        }
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shoe::ShoeId;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidIdentifier.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MissingField(MissingField::Tags).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MalformedBody("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::EndpointNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(StoreError::LockPoisoned).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::InvalidIdentifier.to_string(), "Invalid shoe id");
        assert_eq!(ApiError::NotFound.to_string(), "Shoe not found");
        assert_eq!(
            ApiError::from(MissingField::Color).to_string(),
            "Shoe must have color"
        );
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = ApiError::from(StoreError::Missing(ShoeId::generate()));
        let body = ErrorResponse::from(&err);
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_invalid_id_conversion() {
        let err = ApiError::from(ShoeId::parse("not-an-id").unwrap_err());
        assert!(matches!(err, ApiError::InvalidIdentifier));
    }
}
