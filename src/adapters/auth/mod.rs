//! Authentication adapters.
//!
//! - `argon2_verifier` - Argon2id credential hashes
//! - `jwt` - HS256 session tokens (`TokenIssuer` + `SessionValidator`)
//! - `mock` - Test implementations without real crypto

mod argon2_verifier;
mod jwt;
mod mock;

pub use argon2_verifier::Argon2CredentialVerifier;
pub use jwt::JwtTokenService;
pub use mock::{MockCredentialVerifier, MockSessionValidator};
