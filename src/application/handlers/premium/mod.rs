//! Premium purchase and activation handlers.

mod activate_direct;
mod create_order;
mod handle_payment_webhook;

pub use activate_direct::{
    ActivateDirectCommand, ActivateDirectHandler, DirectActivationResult, PREMIUM_ACTIVATED,
    PREMIUM_ALREADY_ACTIVE,
};
pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult, OrderPricing};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
