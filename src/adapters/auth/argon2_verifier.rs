//! Argon2id credential verifier.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`). Hashing is CPU bound, so
//! both operations run on the blocking pool.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use uuid::Uuid;

use crate::ports::{CredentialError, CredentialVerifier};

/// Production implementation of `CredentialVerifier`.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialVerifier;

impl Argon2CredentialVerifier {
    pub fn new() -> Self {
        Self
    }
}

fn verify_blocking(secret: &str, stored_hash: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| CredentialError::MalformedHash(e.to_string()))?;

    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::Backend(e.to_string())),
    }
}

fn hash_blocking(secret: &str) -> Result<String, CredentialError> {
    // 16 random bytes from a v4 UUID make a valid salt.
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| CredentialError::Backend(e.to_string()))?;

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Backend(e.to_string()))
}

#[async_trait]
impl CredentialVerifier for Argon2CredentialVerifier {
    async fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool, CredentialError> {
        let secret = secret.to_string();
        let stored_hash = stored_hash.to_string();
        tokio::task::spawn_blocking(move || verify_blocking(&secret, &stored_hash))
            .await
            .map_err(|e| CredentialError::Backend(e.to_string()))?
    }

    async fn hash(&self, secret: &str) -> Result<String, CredentialError> {
        let secret = secret.to_string();
        tokio::task::spawn_blocking(move || hash_blocking(&secret))
            .await
            .map_err(|e| CredentialError::Backend(e.to_string()))?
    }
}
