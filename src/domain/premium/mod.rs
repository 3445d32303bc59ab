//! Premium domain - payment orders, webhook capture and activation rules.

mod order;
mod payment_event;
mod plan;
mod settlement;
mod transaction_reference;
mod webhook_errors;
mod webhook_verifier;

pub use order::{Order, OrderStatus};
pub use payment_event::{PaymentEvent, PAYMENT_CAPTURED};
pub use plan::{
    renewal_change, ActivationSource, RenewalPlan, DIRECT_GRANT_MONTHS, MAX_RENEWAL_MONTHS,
    MIN_RENEWAL_MONTHS, WEBHOOK_GRANT_MONTHS,
};
pub use settlement::{settle_order, Settlement};
pub use transaction_reference::{TransactionReference, INVALID_UTR_MESSAGE, MIN_UTR_LEN};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{sign_payload, PaymentWebhookVerifier};
