//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own dto/handlers/routes module; `router` mounts
//! them under `/api` behind the auth middleware.

pub mod admin;
pub mod auth;
pub mod error;
pub mod middleware;
pub mod premium;
mod router;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::app_router;
pub use state::AppState;
