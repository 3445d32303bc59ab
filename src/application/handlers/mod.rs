//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod auth;
pub mod premium;

pub use account::{
    AccountStatsHandler, AccountStatsQuery, BulkRenewCommand, BulkRenewResult,
    RegisterAccountCommand, RegisterAccountHandler, RenewAccountCommand, RenewAccountHandler,
    RenewalFailure, RenewalItem, ToggleRestrictionCommand, ToggleRestrictionHandler,
};
pub use auth::{ForbiddenReason, LoginCommand, LoginError, LoginHandler, LoginOutcome, LoginSession};
pub use premium::{
    ActivateDirectCommand, ActivateDirectHandler, CreateOrderCommand, CreateOrderHandler,
    CreateOrderResult, DirectActivationResult, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler, HandlePaymentWebhookResult, OrderPricing,
};
