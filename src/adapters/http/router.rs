//! Top-level router assembly.

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::admin::admin_routes;
use super::auth::auth_routes;
use super::middleware::auth_middleware;
use super::premium::{premium_routes, webhook_routes};
use super::state::AppState;

/// Builds the full API.
///
/// ```text
/// /health
/// /api/auth/login
/// /api/premium/{orders,subscribe}
/// /api/webhook/razorpay
/// /api/admin/accounts/...
/// ```
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let sessions = state.sessions.clone();

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api/auth", auth_routes())
        .nest("/api/premium", premium_routes())
        .nest("/api/webhook", webhook_routes())
        .nest("/api/admin", admin_routes())
        .layer(middleware::from_fn_with_state(sessions, auth_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
