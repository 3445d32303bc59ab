//! Account administration HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{AccountSummary, BulkRenewRequest, BulkRenewResponse, RegisterAccountRequest};
pub use routes::admin_routes;
