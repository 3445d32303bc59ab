//! Routes for premium endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{create_order, payment_webhook, subscribe};

/// # Routes (Bearer, SUBSCRIBER)
/// - `POST /orders` - Mint a provider order for the premium price
/// - `POST /subscribe` - Activate premium from a bank transfer UTR
pub fn premium_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/subscribe", post(subscribe))
}

/// Separate from premium routes: no user auth, the body is signature verified.
///
/// # Routes
/// - `POST /razorpay` - Payment capture notifications
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/razorpay", post(payment_webhook))
}
