//! Credential verification port.
//!
//! Stored credentials are one-way hashes; this port is the only place a
//! submitted secret meets one.

use async_trait::async_trait;
use thiserror::Error;

/// Failures other than a plain mismatch.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    /// Stored hash could not be parsed.
    #[error("Malformed credential hash: {0}")]
    MalformedHash(String),

    /// Hashing backend failed.
    #[error("Credential backend failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns `Ok(true)` if `secret` matches `stored_hash`.
    async fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool, CredentialError>;

    /// Hashes a new secret for storage.
    async fn hash(&self, secret: &str) -> Result<String, CredentialError>;
}
