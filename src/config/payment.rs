//! Payment configuration (Razorpay)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Payment configuration
///
/// Without `key_id`/`key_secret` the mock provider is used, which
/// validation only allows outside production.
#[derive(Debug, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id (also handed to the client checkout)
    pub key_id: Option<String>,

    /// Razorpay key secret
    pub key_secret: Option<SecretString>,

    /// Webhook signing secret
    pub webhook_secret: SecretString,

    /// Premium price in minor units (paise)
    #[serde(default = "default_premium_amount")]
    pub premium_amount_minor: i64,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Timeout on a single order-creation call
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_ms: u64,

    /// Override for the Razorpay API base URL
    pub api_base_url: Option<String>,
}

impl PaymentConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// True when real provider credentials are configured.
    pub fn has_provider_credentials(&self) -> bool {
        self.key_id.as_deref().is_some_and(|k| !k.is_empty())
            && self
                .key_secret
                .as_ref()
                .is_some_and(|s| !s.expose_secret().is_empty())
    }

    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.key_id.as_deref().is_some_and(|k| k.starts_with("rzp_test_"))
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__WEBHOOK_SECRET"));
        }
        if let Some(key_id) = self.key_id.as_deref() {
            if !key_id.starts_with("rzp_") {
                return Err(ValidationError::InvalidRazorpayKey);
            }
        }
        if *environment == Environment::Production && !self.has_provider_credentials() {
            return Err(ValidationError::PaymentProviderRequired);
        }
        if self.premium_amount_minor <= 0 {
            return Err(ValidationError::InvalidPremiumPrice);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        if self.provider_timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_premium_amount() -> i64 {
    // ₹499.00
    49_900
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_provider_timeout() -> u64 {
    10_000
}
