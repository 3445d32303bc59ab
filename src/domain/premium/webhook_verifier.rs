//! Payment webhook signature verification.
//!
//! The provider signs the raw request body with HMAC-SHA256 using the
//! shared webhook secret and sends the lowercase hex digest in a header.
//! Verification happens over the exact bytes received, before any parsing.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;

/// Verifier for payment webhook signatures.
pub struct PaymentWebhookVerifier {
    secret: SecretString,
}

impl PaymentWebhookVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Checks `signature_header` against the HMAC of `payload`.
    ///
    /// # Errors
    ///
    /// `SignatureInvalid` for a blank header, non-hex header, or digest
    /// mismatch.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), WebhookError> {
        let provided = signature_header.trim();
        if provided.is_empty() {
            return Err(WebhookError::SignatureInvalid);
        }
        let provided = hex::decode(provided).map_err(|_| WebhookError::SignatureInvalid)?;
        let expected = self.compute_signature(payload)?;

        if !constant_time_compare(&expected, &provided) {
            return Err(WebhookError::SignatureInvalid);
        }
        Ok(())
    }

    fn compute_signature(&self, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| WebhookError::SignatureInvalid)?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl std::fmt::Debug for PaymentWebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentWebhookVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes the hex signature a provider would send, for test fixtures.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac = match Hmac::<Sha256>::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whsec_razorpay_test_secret";
    const PAYLOAD: &[u8] = br#"{"event":"payment.captured","payload":{"payment":{"entity":{"id":"pay_1","order_id":"order_1"}}}}"#;

    fn verifier() -> PaymentWebhookVerifier {
        PaymentWebhookVerifier::new(SecretString::new(TEST_SECRET.to_string()))
    }

    // ══════════════════════════════════════════════════════════════
    // Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn accepts_valid_signature() {
        let signature = sign_payload(TEST_SECRET, PAYLOAD);
        assert!(verifier().verify(PAYLOAD, &signature).is_ok());
    }

    #[test]
    fn accepts_uppercase_hex_and_surrounding_whitespace() {
        let signature = format!(" {} ", sign_payload(TEST_SECRET, PAYLOAD).to_uppercase());
        assert!(verifier().verify(PAYLOAD, &signature).is_ok());
    }

    #[test]
    fn rejects_signature_from_other_secret() {
        let signature = sign_payload("some_other_secret", PAYLOAD);
        assert!(matches!(
            verifier().verify(PAYLOAD, &signature),
            Err(WebhookError::SignatureInvalid)
        ));
    }

    #[test]
    fn rejects_any_single_byte_tamper() {
        let signature = sign_payload(TEST_SECRET, PAYLOAD);
        for i in 0..PAYLOAD.len() {
            let mut tampered = PAYLOAD.to_vec();
            tampered[i] ^= 0x01;
            assert!(
                matches!(
                    verifier().verify(&tampered, &signature),
                    Err(WebhookError::SignatureInvalid)
                ),
                "tamper at byte {} was accepted",
                i
            );
        }
    }

    #[test]
    fn rejects_empty_header() {
        assert!(matches!(
            verifier().verify(PAYLOAD, ""),
            Err(WebhookError::SignatureInvalid)
        ));
    }

    #[test]
    fn rejects_non_hex_header() {
        assert!(matches!(
            verifier().verify(PAYLOAD, "not-hex-at-all"),
            Err(WebhookError::SignatureInvalid)
        ));
    }

    #[test]
    fn rejects_truncated_signature() {
        let signature = sign_payload(TEST_SECRET, PAYLOAD);
        assert!(verifier().verify(PAYLOAD, &signature[..32]).is_err());
    }

    #[test]
    fn debug_output_redacts_secret() {
        let debug = format!("{:?}", verifier());
        assert!(!debug.contains(TEST_SECRET));
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Compare Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal() {
        assert!(constant_time_compare(b"hello", b"hello"));
    }

    #[test]
    fn constant_time_compare_different_length() {
        assert!(!constant_time_compare(b"hello", b"hello!"));
    }
}
