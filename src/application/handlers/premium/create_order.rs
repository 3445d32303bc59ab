//! CreateOrderHandler - Mints a payment order for a subscriber's premium.
//!
//! The provider is asked first; the local CREATED order is only written
//! once the provider has answered, so a provider failure leaves no trace.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::domain::premium::Order;
use crate::ports::{AccountStore, CreateOrderRequest, OrderStore, PaymentError, PaymentProvider};

/// Price and currency of the premium purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPricing {
    pub amount_minor: i64,
    pub currency: String,
}

impl Default for OrderPricing {
    fn default() -> Self {
        Self {
            amount_minor: 49900,
            currency: "INR".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub account_id: AccountId,
}

/// What the checkout widget needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderResult {
    pub provider_order_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub provider_public_key: String,
}

pub struct CreateOrderHandler {
    accounts: Arc<dyn AccountStore>,
    orders: Arc<dyn OrderStore>,
    provider: Arc<dyn PaymentProvider>,
    pricing: OrderPricing,
    provider_timeout: Duration,
}

impl CreateOrderHandler {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        orders: Arc<dyn OrderStore>,
        provider: Arc<dyn PaymentProvider>,
        pricing: OrderPricing,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            accounts,
            orders,
            provider,
            pricing,
            provider_timeout,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, DomainError> {
        let account = self
            .accounts
            .find_by_id(cmd.account_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AccountNotFound, "Account not found")
                    .with_detail("account_id", cmd.account_id.to_string())
            })?;
        if account.subscriber.is_none() {
            return Err(
                DomainError::new(ErrorCode::SubscriberNotFound, "Subscriber record not found")
                    .with_detail("account_id", account.id.to_string()),
            );
        }

        let request = CreateOrderRequest {
            amount_minor: self.pricing.amount_minor,
            currency: self.pricing.currency.clone(),
            receipt: format!("premium_{}", account.username),
        };

        let provider_order =
            match tokio::time::timeout(self.provider_timeout, self.provider.create_order(request))
                .await
            {
                Ok(Ok(order)) => order,
                Ok(Err(e)) => {
                    tracing::error!(account_id = %account.id, error = %e, "Payment provider rejected order");
                    return Err(e.into());
                }
                Err(_) => {
                    tracing::error!(account_id = %account.id, "Payment provider timed out");
                    return Err(PaymentError::timeout("payment provider did not answer in time").into());
                }
            };

        let order = Order::create(
            provider_order.id.clone(),
            account.id,
            provider_order.amount_minor,
            provider_order.currency.clone(),
            Timestamp::now(),
        )?;
        self.orders.insert(&order).await?;

        tracing::info!(
            account_id = %account.id,
            provider_order_id = %order.provider_order_id,
            amount = order.amount_minor,
            "Payment order created"
        );

        Ok(CreateOrderResult {
            provider_order_id: order.provider_order_id,
            amount_minor: order.amount_minor,
            currency: order.currency,
            provider_public_key: self.provider.public_key(),
        })
    }
}
