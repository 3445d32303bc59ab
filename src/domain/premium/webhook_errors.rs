//! Webhook error types for payment capture handling.
//!
//! Status codes drive provider redelivery: anything other than 200 is
//! retried by the provider.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// HMAC over the raw body did not match the signature header.
    #[error("Invalid signature")]
    SignatureInvalid,

    /// Failed to parse the webhook payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from webhook payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// No tracked order for the provider order id.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The order's owning account is missing or has no subscriber record.
    #[error("Account not found for order {0}")]
    AccountNotFound(String),

    /// Attempted state transition is not valid.
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    /// Store operation failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebhookError {
    /// Returns true if redelivery of the same event may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WebhookError::Storage(_) | WebhookError::OrderNotFound(_)
        )
    }

    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::SignatureInvalid => StatusCode::UNAUTHORIZED,

            WebhookError::ParseError(_) | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,

            // Data-consistency problems: surface loudly and let the provider retry
            WebhookError::OrderNotFound(_)
            | WebhookError::AccountNotFound(_)
            | WebhookError::InvalidTransition(_)
            | WebhookError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Error Display Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn signature_invalid_displays_correctly() {
        assert_eq!(format!("{}", WebhookError::SignatureInvalid), "Invalid signature");
    }

    #[test]
    fn missing_field_displays_field_name() {
        let err = WebhookError::MissingField("payload.payment.entity.order_id");
        assert_eq!(
            format!("{}", err),
            "Missing field: payload.payment.entity.order_id"
        );
    }

    #[test]
    fn order_not_found_displays_provider_id() {
        let err = WebhookError::OrderNotFound("order_X".to_string());
        assert_eq!(format!("{}", err), "Order not found: order_X");
    }

    // ══════════════════════════════════════════════════════════════
    // Retryability Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn storage_error_is_retryable() {
        assert!(WebhookError::Storage("pool timeout".to_string()).is_retryable());
    }

    #[test]
    fn order_not_found_is_retryable() {
        assert!(WebhookError::OrderNotFound("order_X".to_string()).is_retryable());
    }

    #[test]
    fn signature_and_parse_errors_are_not_retryable() {
        assert!(!WebhookError::SignatureInvalid.is_retryable());
        assert!(!WebhookError::ParseError("eof".to_string()).is_retryable());
        assert!(!WebhookError::MissingField("event").is_retryable());
    }

    // ══════════════════════════════════════════════════════════════
    // Status Code Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn signature_invalid_returns_unauthorized() {
        assert_eq!(
            WebhookError::SignatureInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn parse_errors_return_bad_request() {
        assert_eq!(
            WebhookError::ParseError("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::MissingField("event").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn consistency_errors_return_internal_error() {
        for err in [
            WebhookError::OrderNotFound("o".to_string()),
            WebhookError::AccountNotFound("o".to_string()),
            WebhookError::InvalidTransition("t".to_string()),
            WebhookError::Storage("s".to_string()),
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
