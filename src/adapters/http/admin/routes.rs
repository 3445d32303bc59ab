//! Routes for account administration.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{account_stats, register_account, renew_account, renew_bulk, set_restriction};

/// # Routes (Bearer, ADMIN or COLLEGE_ADMIN)
/// - `POST /accounts` - Register an account
/// - `PUT /accounts/:id/restriction` - Restrict or unrestrict
/// - `POST /accounts/:id/renew` - Extend premium
/// - `POST /accounts/renew-bulk` - Extend premium for many accounts
/// - `GET /accounts/stats` - Subscriber statistics
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(register_account))
        .route("/accounts/stats", get(account_stats))
        .route("/accounts/renew-bulk", post(renew_bulk))
        .route("/accounts/:id/restriction", put(set_restriction))
        .route("/accounts/:id/renew", post(renew_account))
}
