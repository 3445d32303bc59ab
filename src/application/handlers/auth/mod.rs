//! Authentication handlers.

mod login;

pub use login::{
    ForbiddenReason, LoginCommand, LoginError, LoginHandler, LoginOutcome, LoginSession,
    LOGIN_SUCCESSFUL, PREMIUM_REQUIRED, RESTRICTED_BY_ADMIN, SUBSCRIBER_RESTRICTED,
};
