//! Mock payment provider for testing and local runs.
//!
//! Mints sequential order ids, records every request, and supports error
//! injection and an artificial delay for timeout tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{CreateOrderRequest, PaymentError, PaymentProvider, ProviderOrder};

/// Mock payment provider.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_error(PaymentError::network("down"));
/// let result = mock.create_order(request).await;
/// assert!(result.is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockPaymentProvider {
    inner: Mutex<MockState>,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct MockState {
    next_error: Option<PaymentError>,
    requests: Vec<CreateOrderRequest>,
    minted: u64,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeps before answering every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fails the next `create_order` call.
    pub fn set_error(&self, error: PaymentError) {
        if let Ok(mut state) = self.inner.lock() {
            state.next_error = Some(error);
        }
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<CreateOrderRequest> {
        self.inner
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<ProviderOrder, PaymentError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self
            .inner
            .lock()
            .map_err(|_| PaymentError::provider("mock state poisoned"))?;
        state.requests.push(request.clone());
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        state.minted += 1;
        Ok(ProviderOrder {
            id: format!("order_mock_{:06}", state.minted),
            amount_minor: request.amount_minor,
            currency: request.currency,
        })
    }

    fn public_key(&self) -> String {
        "rzp_test_mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateOrderRequest {
        CreateOrderRequest {
            amount_minor: 49900,
            currency: "INR".to_string(),
            receipt: "premium_asha".to_string(),
        }
    }

    #[tokio::test]
    async fn mints_distinct_ids_and_echoes_amount() {
        let mock = MockPaymentProvider::new();

        let first = mock.create_order(request()).await.unwrap();
        let second = mock.create_order(request()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.amount_minor, 49900);
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn injected_error_fails_once() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::network("connection reset"));

        assert!(mock.create_order(request()).await.is_err());
        assert!(mock.create_order(request()).await.is_ok());
    }
}
