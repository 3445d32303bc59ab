//! RenewAccountHandler - Admin extends premium by a number of months.
//!
//! Renewal stacks on an unexpired premium; a lapsed one restarts from now.
//! The bulk form keeps going past individual failures. A college admin may
//! only renew subscribers of its own college.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::account::{Account, PremiumActivation};
use crate::domain::foundation::{
    require_admin, require_admin_over, AccountId, AuthenticatedUser, DomainError, ErrorCode,
    Timestamp,
};
use crate::domain::premium::renewal_change;
use crate::ports::AccountStore;

#[derive(Debug, Clone)]
pub struct RenewAccountCommand {
    pub actor: AuthenticatedUser,
    pub account_id: AccountId,
    pub months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalItem {
    pub account_id: AccountId,
    pub months: u32,
}

#[derive(Debug, Clone)]
pub struct BulkRenewCommand {
    pub actor: AuthenticatedUser,
    pub items: Vec<RenewalItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalFailure {
    pub account_id: AccountId,
    pub error_code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkRenewResult {
    pub renewed: Vec<AccountId>,
    pub failed: Vec<RenewalFailure>,
}

pub struct RenewAccountHandler {
    accounts: Arc<dyn AccountStore>,
}

impl RenewAccountHandler {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, cmd: RenewAccountCommand) -> Result<Account, DomainError> {
        require_admin(&cmd.actor, "renew_account").into_result()?;
        self.renew(&cmd.actor, cmd.account_id, cmd.months).await
    }

    pub async fn handle_bulk(&self, cmd: BulkRenewCommand) -> Result<BulkRenewResult, DomainError> {
        require_admin(&cmd.actor, "renew_account").into_result()?;

        let mut result = BulkRenewResult::default();
        for item in cmd.items {
            match self.renew(&cmd.actor, item.account_id, item.months).await {
                Ok(account) => result.renewed.push(account.id),
                Err(e) => {
                    tracing::warn!(account_id = %item.account_id, error = %e, "Bulk renewal item failed");
                    result.failed.push(RenewalFailure {
                        account_id: item.account_id,
                        error_code: e.code.to_string(),
                        message: e.message,
                    });
                }
            }
        }

        tracing::info!(
            renewed = result.renewed.len(),
            failed = result.failed.len(),
            by = %cmd.actor.username,
            "Bulk renewal finished"
        );
        Ok(result)
    }

    async fn renew(
        &self,
        actor: &AuthenticatedUser,
        account_id: AccountId,
        months: u32,
    ) -> Result<Account, DomainError> {
        let change = renewal_change(months)?;

        let target = self.accounts.find_by_id(account_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::AccountNotFound, "Account not found")
                .with_detail("account_id", account_id.to_string())
        })?;
        require_admin_over(actor, target.role, target.college_id.as_deref(), "renew_account")
            .into_result()?;

        let (account, activation) = self
            .accounts
            .apply_premium(account_id, change, Timestamp::now())
            .await?;

        if let PremiumActivation::Applied { expiry } = activation {
            tracing::info!(
                account_id = %account.id,
                months,
                expiry = %expiry.to_date_string(),
                "Premium renewed"
            );
        }
        Ok(account)
    }
}
