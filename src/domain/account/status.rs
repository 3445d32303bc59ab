//! Subscriber account status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Gate state reported to a subscriber at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Premium is in force; job features unlocked.
    Active,
    /// Authenticated but waiting on premium.
    Hold,
    /// Blocked by an administrator. Implies the account-level flag.
    Restricted,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Hold => "HOLD",
            AccountStatus::Restricted => "RESTRICTED",
        }
    }

    /// Status an unrestricted subscriber should carry for a premium state.
    pub fn for_premium(premium_active: bool) -> Self {
        if premium_active {
            AccountStatus::Active
        } else {
            AccountStatus::Hold
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(AccountStatus::Active),
            "HOLD" => Ok(AccountStatus::Hold),
            "RESTRICTED" => Ok(AccountStatus::Restricted),
            other => Err(ValidationError::invalid_format(
                "account_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}
