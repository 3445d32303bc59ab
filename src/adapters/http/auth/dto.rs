//! Request/response bodies for the login endpoint.

use serde::{Deserialize, Serialize};

use crate::application::handlers::LoginSession;
use crate::domain::account::AccountStatus;
use crate::domain::foundation::{AccountId, Role};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub identifier: String,
    pub secret: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub principal_id: AccountId,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub college_id: Option<String>,
    pub account_status: AccountStatus,
    pub premium_active: bool,
    pub message: String,
}

impl From<LoginSession> for LoginResponse {
    fn from(session: LoginSession) -> Self {
        Self {
            token: session.token,
            principal_id: session.account_id,
            username: session.username,
            full_name: session.full_name,
            role: session.role,
            college_id: session.college_id,
            account_status: session.account_status,
            premium_active: session.premium_active,
            message: session.message.to_string(),
        }
    }
}

/// Body for 401 login responses.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRejection {
    pub message: &'static str,
}

/// Body for 403 login responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForbidden {
    pub account_status: &'static str,
    pub message: &'static str,
}
