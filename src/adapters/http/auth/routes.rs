//! Routes for authentication endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::login;

/// # Routes
/// - `POST /login` - Exchange credentials for a session token
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
