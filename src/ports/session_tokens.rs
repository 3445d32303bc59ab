//! Session token ports.
//!
//! Login issues a token through [`TokenIssuer`]; HTTP middleware turns a
//! Bearer token back into an [`AuthenticatedUser`] through
//! [`SessionValidator`]. One adapter usually implements both.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Issues signed session tokens after a successful login.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError>;
}

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed or badly signed tokens
/// - `AuthError::TokenExpired` for expired tokens
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
