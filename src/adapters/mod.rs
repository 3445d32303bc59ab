//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Argon2 credential hashes, JWT sessions, mocks
//! - `http` - axum REST API
//! - `memory` - In-memory stores for tests and database-less runs
//! - `notify` - Email delivery (Resend, logging, recording)
//! - `postgres` - sqlx stores
//! - `razorpay` - Payment provider order minting

pub mod auth;
pub mod http;
pub mod memory;
pub mod notify;
pub mod postgres;
pub mod razorpay;
