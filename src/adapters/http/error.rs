//! Conversion of domain errors into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(self.0.code)
    }
}

/// Maps an error code to its HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::AccountNotFound | ErrorCode::SubscriberNotFound | ErrorCode::OrderNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::AccountExists | ErrorCode::DuplicateOrder => StatusCode::CONFLICT,
        ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::PaymentProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err = self.0;

        if status.is_server_error() {
            tracing::error!(code = %err.code, error = %err.message, "Request failed");
        }

        // Internal causes stay in the log.
        let body = match err.code {
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                ErrorResponse::new(err.code.to_string(), "Internal server error")
            }
            _ if err.details.is_empty() => ErrorResponse::new(err.code.to_string(), err.message),
            _ => {
                let details = serde_json::to_value(&err.details).unwrap_or_default();
                ErrorResponse::with_details(err.code.to_string(), err.message, details)
            }
        };

        (status, Json(body)).into_response()
    }
}
