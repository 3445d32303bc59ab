//! Login HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{LoginRequest, LoginResponse, INVALID_CREDENTIALS};
pub use routes::auth_routes;
