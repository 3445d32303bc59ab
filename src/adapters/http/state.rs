//! Shared application state for all routes.

use std::sync::Arc;

use crate::application::handlers::{
    AccountStatsHandler, ActivateDirectHandler, CreateOrderHandler, HandlePaymentWebhookHandler,
    LoginHandler, RegisterAccountHandler, RenewAccountHandler, ToggleRestrictionHandler,
};
use crate::ports::SessionValidator;

/// Handlers are built once at startup and shared by reference.
#[derive(Clone)]
pub struct AppState {
    pub login: Arc<LoginHandler>,
    pub create_order: Arc<CreateOrderHandler>,
    pub activate_direct: Arc<ActivateDirectHandler>,
    pub payment_webhook: Arc<HandlePaymentWebhookHandler>,
    pub register_account: Arc<RegisterAccountHandler>,
    pub toggle_restriction: Arc<ToggleRestrictionHandler>,
    pub renew_account: Arc<RenewAccountHandler>,
    pub account_stats: Arc<AccountStatsHandler>,
    pub sessions: Arc<dyn SessionValidator>,
}
