//! Request/response bodies for premium endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::CreateOrderResult;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub provider_order_id: String,
    /// Minor currency units (paise).
    pub amount: i64,
    pub currency: String,
    pub provider_public_key: String,
}

impl From<CreateOrderResult> for CreateOrderResponse {
    fn from(result: CreateOrderResult) -> Self {
        Self {
            provider_order_id: result.provider_order_id,
            amount: result.amount_minor,
            currency: result.currency,
            provider_public_key: result.provider_public_key,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub utr_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_request_reads_camel_case() {
        let req: SubscribeRequest = serde_json::from_str(r#"{"utrNumber":"UTR123456789"}"#).unwrap();
        assert_eq!(req.utr_number, "UTR123456789");
    }

    #[test]
    fn order_response_uses_camel_case() {
        let json = serde_json::to_value(CreateOrderResponse {
            provider_order_id: "order_1".to_string(),
            amount: 49900,
            currency: "INR".to_string(),
            provider_public_key: "rzp_test_key".to_string(),
        })
        .unwrap();

        assert_eq!(json["providerOrderId"], "order_1");
        assert_eq!(json["amount"], 49900);
        assert_eq!(json["providerPublicKey"], "rzp_test_key");
    }
}
