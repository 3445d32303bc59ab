//! Payment order tracking.
//!
//! An order is a provider-issued payment intent. It starts CREATED and is
//! moved to PAID exactly once, by a verified capture event.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    AccountId, OrderId, StateMachine, Timestamp, ValidationError,
};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Minted by the provider, awaiting capture.
    Created,
    /// Capture confirmed. Terminal.
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Paid => "PAID",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(OrderStatus::Created),
            "PAID" => Ok(OrderStatus::Paid),
            other => Err(ValidationError::invalid_format(
                "order_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (OrderStatus::Created, OrderStatus::Paid))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            OrderStatus::Created => vec![OrderStatus::Paid],
            OrderStatus::Paid => vec![],
        }
    }
}

/// A tracked purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    /// Provider-assigned id; unique across orders.
    pub provider_order_id: String,
    pub account_id: AccountId,
    /// Amount in the currency's minor unit (paise for INR).
    pub amount_minor: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub provider_payment_id: Option<String>,
    pub created_at: Timestamp,
    pub paid_at: Option<Timestamp>,
}

impl Order {
    /// Records a freshly minted provider order.
    pub fn create(
        provider_order_id: impl Into<String>,
        account_id: AccountId,
        amount_minor: i64,
        currency: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let provider_order_id = provider_order_id.into();
        if provider_order_id.trim().is_empty() {
            return Err(ValidationError::empty_field("provider_order_id"));
        }
        if amount_minor <= 0 {
            return Err(ValidationError::out_of_range(
                "amount_minor",
                1,
                i64::MAX,
                amount_minor,
            ));
        }

        Ok(Self {
            id: OrderId::new(),
            provider_order_id,
            account_id,
            amount_minor,
            currency: currency.into(),
            status: OrderStatus::Created,
            provider_payment_id: None,
            created_at: now,
            paid_at: None,
        })
    }

    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }

    /// Moves CREATED -> PAID and records the provider payment id.
    ///
    /// The payment id is only ever written here, so a CREATED order
    /// never carries one.
    pub fn mark_paid(
        &mut self,
        provider_payment_id: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        let provider_payment_id = provider_payment_id.into();
        if provider_payment_id.trim().is_empty() {
            return Err(ValidationError::empty_field("provider_payment_id"));
        }
        self.status = self.status.transition_to(OrderStatus::Paid)?;
        self.provider_payment_id = Some(provider_payment_id);
        self.paid_at = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created() -> Order {
        Order::create("order_Nx1", AccountId::new(), 49_900, "INR", Timestamp::now()).unwrap()
    }

    // Unit Tests - State Transitions

    #[test]
    fn created_can_transition_to_paid() {
        assert!(OrderStatus::Created.can_transition_to(&OrderStatus::Paid));
        assert_eq!(
            OrderStatus::Created.transition_to(OrderStatus::Paid),
            Ok(OrderStatus::Paid)
        );
    }

    #[test]
    fn paid_cannot_return_to_created() {
        assert!(!OrderStatus::Paid.can_transition_to(&OrderStatus::Created));
        assert!(OrderStatus::Paid.transition_to(OrderStatus::Created).is_err());
    }

    #[test]
    fn paid_cannot_be_paid_again() {
        assert!(OrderStatus::Paid.transition_to(OrderStatus::Paid).is_err());
    }

    #[test]
    fn paid_is_terminal() {
        assert!(OrderStatus::Paid.is_terminal());
        assert!(!OrderStatus::Created.is_terminal());
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for status in [OrderStatus::Created, OrderStatus::Paid] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target));
            }
        }
    }

    // Unit Tests - Order

    #[test]
    fn new_order_is_created_without_payment_id() {
        let order = created();
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.provider_payment_id, None);
        assert_eq!(order.paid_at, None);
    }

    #[test]
    fn create_rejects_blank_provider_id() {
        let result = Order::create(" ", AccountId::new(), 100, "INR", Timestamp::now());
        assert_eq!(
            result.unwrap_err(),
            ValidationError::empty_field("provider_order_id")
        );
    }

    #[test]
    fn create_rejects_non_positive_amount() {
        let result = Order::create("order_1", AccountId::new(), 0, "INR", Timestamp::now());
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn mark_paid_records_payment() {
        let mut order = created();
        let now = Timestamp::now();
        order.mark_paid("pay_Q9", now).unwrap();

        assert!(order.is_paid());
        assert_eq!(order.provider_payment_id.as_deref(), Some("pay_Q9"));
        assert_eq!(order.paid_at, Some(now));
    }

    #[test]
    fn mark_paid_twice_keeps_first_payment() {
        let mut order = created();
        order.mark_paid("pay_first", Timestamp::now()).unwrap();

        assert!(order.mark_paid("pay_second", Timestamp::now()).is_err());
        assert_eq!(order.provider_payment_id.as_deref(), Some("pay_first"));
    }

    #[test]
    fn mark_paid_rejects_blank_payment_id() {
        let mut order = created();
        assert!(order.mark_paid("", Timestamp::now()).is_err());
        assert_eq!(order.status, OrderStatus::Created);
    }

    #[test]
    fn status_parses_stored_values() {
        assert_eq!("PAID".parse::<OrderStatus>(), Ok(OrderStatus::Paid));
        assert!("REFUNDED".parse::<OrderStatus>().is_err());
    }
}
