//! Mock authentication adapters for testing.
//!
//! These implement `SessionValidator`, `TokenIssuer` and
//! `CredentialVerifier` without real crypto, so handler and router tests
//! stay fast and deterministic.
//!
//! # Example
//!
//! ```ignore
//! use srots_access::adapters::auth::{MockCredentialVerifier, MockSessionValidator};
//!
//! let validator = MockSessionValidator::new().with_user("valid-token", user);
//! let hash = MockCredentialVerifier::hash_of("s3cret-pass");
//! ```

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::{CredentialError, CredentialVerifier, SessionValidator, TokenIssuer};

/// Mock session validator and issuer.
///
/// Stores a map of tokens to users. Tokens not in the map return
/// `InvalidToken`. Issuing a token registers it, so a login can be
/// followed by an authenticated request in the same test.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        if let Ok(mut slot) = self.force_error.write() {
            *slot = Some(error);
        }
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), user);
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.read().map(|t| t.len()).unwrap_or(0)
    }
}

impl TokenIssuer for MockSessionValidator {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        let token = format!("mock-token-{}", user.account_id);
        self.add_token(token.clone(), user.clone());
        Ok(token)
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().ok().and_then(|e| e.clone()) {
            return Err(error);
        }

        self.tokens
            .read()
            .ok()
            .and_then(|tokens| tokens.get(token).cloned())
            .ok_or(AuthError::InvalidToken)
    }
}

/// Mock credential verifier.
///
/// "Hashes" are the secret with a `mock$` prefix. A configured delay lets
/// tests exercise the login timeout.
#[derive(Debug, Default)]
pub struct MockCredentialVerifier {
    delay: Option<Duration>,
    force_error: Option<CredentialError>,
}

impl MockCredentialVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored form of `secret`.
    pub fn hash_of(secret: &str) -> String {
        format!("mock${}", secret)
    }

    /// Sleeps before every verification.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_error(mut self, error: CredentialError) -> Self {
        self.force_error = Some(error);
        self
    }
}

#[async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool, CredentialError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.force_error.clone() {
            return Err(error);
        }
        match stored_hash.strip_prefix("mock$") {
            Some(expected) => Ok(expected == secret),
            None => Err(CredentialError::MalformedHash(
                "missing mock$ prefix".to_string(),
            )),
        }
    }

    async fn hash(&self, secret: &str) -> Result<String, CredentialError> {
        if let Some(error) = self.force_error.clone() {
            return Err(error);
        }
        Ok(Self::hash_of(secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AccountId, Role};

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "asha", Role::Subscriber)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // MockSessionValidator Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn mock_validator_returns_user_for_registered_token() {
        let user = test_user();
        let validator = MockSessionValidator::new().with_user("valid-token", user.clone());

        let result = validator.validate("valid-token").await.unwrap();

        assert_eq!(result, user);
    }

    #[tokio::test]
    async fn mock_validator_returns_invalid_token_for_unknown() {
        let validator = MockSessionValidator::new();

        let result = validator.validate("unknown-token").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn mock_validator_with_error_forces_error() {
        let validator = MockSessionValidator::new()
            .with_user("valid-token", test_user())
            .with_error(AuthError::ServiceUnavailable("Test error".to_string()));

        let result = validator.validate("valid-token").await;

        assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn issued_token_validates() {
        let validator = MockSessionValidator::new();
        let user = test_user();

        let token = validator.issue(&user).unwrap();

        assert_eq!(validator.validate(&token).await.unwrap(), user);
        assert_eq!(validator.token_count(), 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // MockCredentialVerifier Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn mock_verifier_matches_its_own_hash() {
        let verifier = MockCredentialVerifier::new();
        let hash = verifier.hash("s3cret-pass").await.unwrap();

        assert!(verifier.verify("s3cret-pass", &hash).await.unwrap());
        assert!(!verifier.verify("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn mock_verifier_rejects_foreign_hash_format() {
        let verifier = MockCredentialVerifier::new();

        let result = verifier.verify("x", "$argon2id$v=19$...").await;

        assert!(matches!(result, Err(CredentialError::MalformedHash(_))));
    }
}
