//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Every handler takes its collaborators as `Arc<dyn Port>` at construction.

pub mod handlers;

pub use handlers::{
    // Login
    LoginCommand, LoginError, LoginHandler, LoginOutcome, LoginSession,
    // Premium
    ActivateDirectHandler, CreateOrderHandler, HandlePaymentWebhookHandler,
    // Administration
    AccountStatsHandler, RegisterAccountHandler, RenewAccountHandler, ToggleRestrictionHandler,
};
