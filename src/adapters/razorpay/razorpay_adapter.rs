//! Razorpay payment provider adapter.
//!
//! Implements `PaymentProvider::create_order` against the Orders API.
//! Webhook signatures are verified in the domain, not here.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::new(key_id, key_secret);
//! let adapter = RazorpayPaymentAdapter::new(config, Duration::from_secs(10))?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{
    CreateOrderRequest, PaymentError, PaymentErrorCode, PaymentProvider, ProviderOrder,
};

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id (rzp_live_... or rzp_test_...).
    key_id: String,

    key_secret: SecretString,

    /// Base URL for the API (default: https://api.razorpay.com).
    api_base_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Override the API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.api_base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct OrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct RazorpayOrder {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorEnvelope {
    error: RazorpayErrorBody,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorBody {
    code: Option<String>,
    description: Option<String>,
}

/// Razorpay implementation of `PaymentProvider`.
#[derive(Debug)]
pub struct RazorpayPaymentAdapter {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayPaymentAdapter {
    /// Builds the adapter with a client-level request timeout.
    pub fn new(config: RazorpayConfig, timeout: Duration) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PaymentError::provider(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn classify_failure(status: reqwest::StatusCode, body: &str) -> PaymentError {
        let parsed = serde_json::from_str::<RazorpayErrorEnvelope>(body).ok();
        let description = parsed
            .as_ref()
            .and_then(|e| e.error.description.clone())
            .unwrap_or_else(|| body.to_string());

        let code = if status == reqwest::StatusCode::UNAUTHORIZED {
            PaymentErrorCode::AuthenticationError
        } else if status.is_client_error() {
            PaymentErrorCode::InvalidRequest
        } else {
            PaymentErrorCode::ProviderError
        };

        let error = PaymentError::new(code, format!("Razorpay API error: {}", description));
        match parsed.and_then(|e| e.error.code) {
            Some(provider_code) => error.with_provider_code(provider_code),
            None => error,
        }
    }
}

#[async_trait]
impl PaymentProvider for RazorpayPaymentAdapter {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<ProviderOrder, PaymentError> {
        let body = OrderBody {
            amount: request.amount_minor,
            currency: &request.currency,
            receipt: &request.receipt,
        };

        let response = self
            .http_client
            .post(self.config.orders_url())
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::timeout(e.to_string())
                } else {
                    PaymentError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Razorpay create_order failed");
            return Err(Self::classify_failure(status, &error_text));
        }

        let order: RazorpayOrder = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Razorpay response: {}", e))
        })?;

        tracing::info!(provider_order_id = %order.id, amount = order.amount, "Razorpay order created");

        Ok(ProviderOrder {
            id: order.id,
            amount_minor: order.amount,
            currency: order.currency,
        })
    }

    fn public_key(&self) -> String {
        self.config.key_id.clone()
    }
}
