//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what a validated session token resolves to.
//! Any token format can populate it via the `SessionValidator` port.

use super::{AccountId, Role};
use thiserror::Error;

/// Principal extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub account_id: AccountId,
    pub username: String,
    pub role: Role,
    /// College a COLLEGE_ADMIN administers. Unused for other roles.
    pub college_id: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(account_id: AccountId, username: impl Into<String>, role: Role) -> Self {
        Self {
            account_id,
            username: username.into(),
            role,
            college_id: None,
        }
    }

    pub fn with_college(mut self, college_id: Option<String>) -> Self {
        self.college_id = college_id;
        self
    }

    /// Returns true if this principal may manage other accounts.
    pub fn is_admin(&self) -> bool {
        self.role.is_administrative()
    }
}

/// Authentication errors that can occur during token issuance or validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Authenticated, but the role does not allow this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Signing failed or the token service is misconfigured.
    #[error("Token service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the client should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
