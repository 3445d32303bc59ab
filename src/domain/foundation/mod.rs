//! Foundation module - Shared domain primitives.
//!
//! Identifiers, time, roles, error types and the state machine trait
//! used across the account and premium domains.

mod auth;
mod authorization;
mod errors;
mod ids;
mod role;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use authorization::{
    admin_college_scope, require_admin, require_admin_over, require_role, AuthorizationResult,
};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AccountId, OrderId};
pub use role::Role;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
