//! Premium HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateOrderResponse, MessageResponse, SubscribeRequest};
pub use handlers::SIGNATURE_HEADER;
pub use routes::{premium_routes, webhook_routes};
