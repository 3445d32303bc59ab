//! HS256 session tokens.
//!
//! Implements both `TokenIssuer` and `SessionValidator`. Claims carry the
//! account id, username, role and college; nothing else is trusted from a
//! token.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{AccountId, AuthError, AuthenticatedUser, Role};
use crate::ports::{SessionValidator, TokenIssuer};

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Account id.
    sub: String,
    username: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    college_id: Option<String>,
    iat: i64,
    exp: i64,
}

/// Signs and validates session JWTs with a shared secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl,
        }
    }

    fn encode_claims(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            AuthError::service_unavailable("token signing failed")
        })
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.account_id.to_string(),
            username: user.username.clone(),
            role: user.role,
            college_id: user.college_id.clone(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        self.encode_claims(&claims)
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::debug!(error = %e, "Token validation failed");
                        AuthError::InvalidToken
                    }
                }
            })?;

        let claims = data.claims;
        let account_id = Uuid::parse_str(&claims.sub)
            .map(AccountId::from_uuid)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser::new(account_id, claims.username, claims.role)
            .with_college(claims.college_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtTokenService {
        JwtTokenService::new(
            &SecretString::new("test-secret-at-least-32-bytes-long!!".to_string()),
            Duration::from_secs(3600),
        )
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "asha", Role::Subscriber)
    }

    #[tokio::test]
    async fn issued_token_round_trips_identity() {
        let service = service();
        let user = user();

        let token = service.issue(&user).unwrap();
        let validated = service.validate(&token).await.unwrap();

        assert_eq!(validated, user);
    }

    #[tokio::test]
    async fn college_scope_survives_the_token() {
        let service = service();
        let admin = AuthenticatedUser::new(AccountId::new(), "dean", Role::CollegeAdmin)
            .with_college(Some("CLG-1".to_string()));

        let token = service.issue(&admin).unwrap();
        let validated = service.validate(&token).await.unwrap();

        assert_eq!(validated.college_id.as_deref(), Some("CLG-1"));
        assert_eq!(validated, admin);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() {
        let other = JwtTokenService::new(
            &SecretString::new("another-secret-entirely-different".to_string()),
            Duration::from_secs(3600),
        );
        let token = other.issue(&user()).unwrap();

        let result = service().validate(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let service = service();
        let past = Utc::now().timestamp() - 3600;
        let token = service
            .encode_claims(&SessionClaims {
                sub: AccountId::new().to_string(),
                username: "asha".to_string(),
                role: Role::Subscriber,
                college_id: None,
                iat: past - 60,
                exp: past,
            })
            .unwrap();

        let result = service.validate(&token).await;

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        let result = service().validate("not.a.jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
