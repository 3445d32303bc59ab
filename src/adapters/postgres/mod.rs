//! PostgreSQL adapters.
//!
//! Schema lives in `migrations/`.

mod account_store;
mod order_store;
mod rows;

pub use account_store::PostgresAccountStore;
pub use order_store::PostgresOrderStore;
