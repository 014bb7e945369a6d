//! # HTTP API Errors
//!
//! Error types for the character API, with their status-code mapping and
//! axum response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for handler operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Character API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Query parameter failed integer parsing
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Insert body missing a required field
    #[error("Missing requirement: {0}")]
    MissingRequirement(String),

    /// Request body is not a JSON object
    #[error("Character must be a JSON object")]
    InvalidBody,

    /// No character with the requested id
    #[error("Character not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Persistence or internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingRequirement(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::MissingRequirement(field) => ApiError::MissingRequirement(field.to_string()),
            StoreError::NotAnObject => ApiError::InvalidBody,
            StoreError::Persistence(msg) => ApiError::Internal(msg),
            StoreError::Malformed(msg) => ApiError::Internal(msg),
            StoreError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// Error response body.
///
/// Exactly `{"error": "<message>"}`; clients compare whole bodies, so no
/// extra keys.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
