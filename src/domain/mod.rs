//! Domain layer - business logic with no infrastructure concerns.

pub mod account;
pub mod foundation;
pub mod premium;
