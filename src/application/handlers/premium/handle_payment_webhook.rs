//! HandlePaymentWebhookHandler - Turns a captured payment into premium.
//!
//! Flow: verify signature -> parse -> locate order -> idempotency guard ->
//! atomic settle -> best-effort email.
//!
//! ## Idempotency
//!
//! The provider redelivers until it sees a 200, so the same capture can
//! arrive many times, possibly concurrently. The early PAID check answers
//! plain redeliveries cheaply; `OrderStore::settle` re-checks under its own
//! lock so only one delivery ever performs the transition.

use std::sync::Arc;

use crate::domain::account::PremiumActivation;
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::domain::premium::{PaymentEvent, PaymentWebhookVerifier, Settlement, WebhookError};
use crate::ports::{dispatch_best_effort, Notification, NotificationReceipt, Notifier, OrderStore};

/// Command carrying the raw webhook request.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw body bytes exactly as received.
    pub payload: Vec<u8>,
    /// Value of the signature header.
    pub signature: String,
}

/// Result of processing a webhook.
#[derive(Debug)]
pub enum HandlePaymentWebhookResult {
    /// Order moved to PAID by this delivery.
    Activated {
        account_id: AccountId,
        provider_order_id: String,
        activation: PremiumActivation,
        /// Present when premium fields actually changed.
        notification: Option<NotificationReceipt>,
    },
    /// Order was already PAID; nothing changed.
    AlreadyProcessed,
    /// Event type we don't act on.
    Ignored(String),
}

pub struct HandlePaymentWebhookHandler {
    verifier: PaymentWebhookVerifier,
    orders: Arc<dyn OrderStore>,
    notifier: Arc<dyn Notifier>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        verifier: PaymentWebhookVerifier,
        orders: Arc<dyn OrderStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            verifier,
            orders,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        if let Err(e) = self.verifier.verify(&cmd.payload, &cmd.signature) {
            tracing::warn!(
                security_event = "webhook_signature_invalid",
                "Rejected payment webhook with invalid signature"
            );
            return Err(e);
        }

        let (provider_order_id, provider_payment_id) = match PaymentEvent::parse(&cmd.payload)? {
            PaymentEvent::Captured {
                provider_order_id,
                provider_payment_id,
            } => (provider_order_id, provider_payment_id),
            PaymentEvent::Other(event_type) => {
                tracing::debug!(event_type = %event_type, "Ignoring payment webhook event");
                return Ok(HandlePaymentWebhookResult::Ignored(event_type));
            }
        };

        let order = self
            .orders
            .find_by_provider_order_id(&provider_order_id)
            .await
            .map_err(|e| WebhookError::Storage(e.to_string()))?
            .ok_or_else(|| {
                tracing::error!(
                    provider_order_id = %provider_order_id,
                    "Captured payment for untracked order"
                );
                WebhookError::OrderNotFound(provider_order_id.clone())
            })?;

        if order.is_paid() {
            tracing::info!(provider_order_id = %provider_order_id, "Webhook already processed");
            return Ok(HandlePaymentWebhookResult::AlreadyProcessed);
        }

        let settlement = self
            .orders
            .settle(&provider_order_id, &provider_payment_id, Timestamp::now())
            .await
            .map_err(|e| settlement_error(e, &provider_order_id))?;

        let (order, account, activation) = match settlement {
            Settlement::AlreadyPaid => {
                tracing::info!(
                    provider_order_id = %provider_order_id,
                    "Concurrent delivery settled first"
                );
                return Ok(HandlePaymentWebhookResult::AlreadyProcessed);
            }
            Settlement::Paid {
                order,
                account,
                activation,
            } => (order, account, activation),
        };

        let notification = match activation {
            PremiumActivation::Applied { expiry } => Some(dispatch_best_effort(
                self.notifier.clone(),
                Notification::PremiumActivated {
                    to: account.email.clone(),
                    expiry,
                },
            )),
            PremiumActivation::AlreadyActive { .. } => None,
        };

        tracing::info!(
            account_id = %account.id,
            provider_order_id = %order.provider_order_id,
            premium_applied = activation.was_applied(),
            "Payment captured, order settled"
        );

        Ok(HandlePaymentWebhookResult::Activated {
            account_id: account.id,
            provider_order_id: order.provider_order_id,
            activation,
            notification,
        })
    }
}

fn settlement_error(err: DomainError, provider_order_id: &str) -> WebhookError {
    match err.code {
        ErrorCode::OrderNotFound => WebhookError::OrderNotFound(provider_order_id.to_string()),
        ErrorCode::AccountNotFound | ErrorCode::SubscriberNotFound => {
            tracing::error!(
                provider_order_id = %provider_order_id,
                error = %err,
                "Order owner missing or not a subscriber"
            );
            WebhookError::AccountNotFound(provider_order_id.to_string())
        }
        ErrorCode::InvalidStateTransition => WebhookError::InvalidTransition(err.message),
        _ => WebhookError::Storage(err.to_string()),
    }
}
