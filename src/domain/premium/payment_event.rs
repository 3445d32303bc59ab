//! Payment provider webhook events.
//!
//! Only `payment.captured` carries meaning here; every other event kind is
//! acknowledged and ignored.

use serde::Deserialize;

use super::webhook_errors::WebhookError;

pub const PAYMENT_CAPTURED: &str = "payment.captured";

/// Interpreted webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    /// Payment for `provider_order_id` was captured as `provider_payment_id`.
    Captured {
        provider_order_id: String,
        provider_payment_id: String,
    },
    /// Any other event kind, carrying its type name.
    Other(String),
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    event: Option<String>,
    #[serde(default)]
    payload: Option<RawPayload>,
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    payment: Option<RawPayment>,
}

#[derive(Debug, Deserialize)]
struct RawPayment {
    entity: Option<RawEntity>,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    id: Option<String>,
    order_id: Option<String>,
}

impl PaymentEvent {
    /// Parses an already-verified webhook body.
    pub fn parse(payload: &[u8]) -> Result<Self, WebhookError> {
        let raw: RawEvent = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let event = raw
            .event
            .filter(|e| !e.is_empty())
            .ok_or(WebhookError::MissingField("event"))?;
        if event != PAYMENT_CAPTURED {
            return Ok(PaymentEvent::Other(event));
        }

        let entity = raw
            .payload
            .and_then(|p| p.payment)
            .and_then(|p| p.entity)
            .ok_or(WebhookError::MissingField("payload.payment.entity"))?;
        let provider_order_id = entity
            .order_id
            .filter(|id| !id.is_empty())
            .ok_or(WebhookError::MissingField("payload.payment.entity.order_id"))?;
        let provider_payment_id = entity
            .id
            .filter(|id| !id.is_empty())
            .ok_or(WebhookError::MissingField("payload.payment.entity.id"))?;

        Ok(PaymentEvent::Captured {
            provider_order_id,
            provider_payment_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_captured_payment() {
        let body = br#"{
            "entity": "event",
            "event": "payment.captured",
            "payload": {"payment": {"entity": {"id": "pay_29QQoUBi66xm2f", "order_id": "order_9A33XWu170gUtm", "amount": 49900}}}
        }"#;

        assert_eq!(
            PaymentEvent::parse(body).unwrap(),
            PaymentEvent::Captured {
                provider_order_id: "order_9A33XWu170gUtm".to_string(),
                provider_payment_id: "pay_29QQoUBi66xm2f".to_string(),
            }
        );
    }

    #[test]
    fn other_events_are_reported_by_name() {
        let body = br#"{"event":"payment.failed","payload":{}}"#;
        assert_eq!(
            PaymentEvent::parse(body).unwrap(),
            PaymentEvent::Other("payment.failed".to_string())
        );
    }

    #[test]
    fn other_events_need_no_payment_entity() {
        let body = br#"{"event":"order.paid"}"#;
        assert!(matches!(PaymentEvent::parse(body), Ok(PaymentEvent::Other(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            PaymentEvent::parse(b"{not json"),
            Err(WebhookError::ParseError(_))
        ));
    }

    #[test]
    fn missing_event_type_is_reported() {
        assert!(matches!(
            PaymentEvent::parse(br#"{"payload":{}}"#),
            Err(WebhookError::MissingField("event"))
        ));
    }

    #[test]
    fn captured_without_order_id_is_reported() {
        let body = br#"{"event":"payment.captured","payload":{"payment":{"entity":{"id":"pay_1"}}}}"#;
        assert!(matches!(
            PaymentEvent::parse(body),
            Err(WebhookError::MissingField("payload.payment.entity.order_id"))
        ));
    }

    #[test]
    fn captured_without_entity_is_reported() {
        let body = br#"{"event":"payment.captured","payload":{}}"#;
        assert!(matches!(
            PaymentEvent::parse(body),
            Err(WebhookError::MissingField("payload.payment.entity"))
        ));
    }
}
