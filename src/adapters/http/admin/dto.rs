//! Request/response bodies for account administration.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{BulkRenewResult, RenewalFailure, RenewalItem};
use crate::domain::account::{Account, AccountStatus, NewAccount};
use crate::domain::foundation::{AccountId, Role, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub college_id: Option<String>,
    pub password: String,
}

impl RegisterAccountRequest {
    /// Splits into profile fields and the plaintext password.
    pub fn into_parts(self) -> (NewAccount, String) {
        (
            NewAccount {
                username: self.username,
                email: self.email,
                full_name: self.full_name,
                role: self.role,
                college_id: self.college_id,
            },
            self.password,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestrictionRequest {
    pub restricted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenewRequest {
    pub months: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalUpdate {
    pub account_id: AccountId,
    pub months: u32,
}

impl From<RenewalUpdate> for RenewalItem {
    fn from(update: RenewalUpdate) -> Self {
        Self {
            account_id: update.account_id,
            months: update.months,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkRenewRequest {
    pub updates: Vec<RenewalUpdate>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: AccountId,
}

/// Account as shown to administrators.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub college_id: Option<String>,
    pub restricted: bool,
    /// Effective premium, not the stored flag.
    pub premium_active: bool,
    /// ISO 8601.
    pub premium_expiry: Option<String>,
    pub account_status: Option<AccountStatus>,
}

impl AccountSummary {
    pub fn from_account(account: &Account, now: &Timestamp) -> Self {
        let profile = account.subscriber.as_ref();
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role,
            college_id: account.college_id.clone(),
            restricted: account.restricted,
            premium_active: account.premium_active_at(now),
            premium_expiry: profile
                .and_then(|p| p.premium_expiry)
                .map(|t| t.as_datetime().to_rfc3339()),
            account_status: profile.map(|p| p.account_status),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkRenewResponse {
    pub renewed: Vec<AccountId>,
    pub failed: Vec<RenewalFailure>,
}

impl From<BulkRenewResult> for BulkRenewResponse {
    fn from(result: BulkRenewResult) -> Self {
        Self {
            renewed: result.renewed,
            failed: result.failed,
        }
    }
}
