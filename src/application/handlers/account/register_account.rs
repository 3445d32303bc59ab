//! RegisterAccountHandler - Admin creates a principal.

use std::sync::Arc;

use crate::domain::account::{Account, NewAccount};
use crate::domain::foundation::{
    require_admin, require_admin_over, AccountId, AuthenticatedUser, DomainError, ErrorCode, Role,
    Timestamp, ValidationError,
};
use crate::ports::{AccountStore, CredentialVerifier};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
    pub actor: AuthenticatedUser,
    pub account: NewAccount,
    pub password: String,
}

pub struct RegisterAccountHandler {
    accounts: Arc<dyn AccountStore>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl RegisterAccountHandler {
    pub fn new(accounts: Arc<dyn AccountStore>, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            accounts,
            credentials,
        }
    }

    pub async fn handle(&self, mut cmd: RegisterAccountCommand) -> Result<AccountId, DomainError> {
        require_admin(&cmd.actor, "register_account").into_result()?;

        // College admins register into their own college by default.
        if cmd.actor.role == Role::CollegeAdmin && cmd.account.college_id.is_none() {
            cmd.account.college_id = cmd.actor.college_id.clone();
        }
        require_admin_over(
            &cmd.actor,
            cmd.account.role,
            cmd.account.college_id.as_deref(),
            "register_account",
        )
        .into_result()?;

        if cmd.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::invalid_format(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            )
            .into());
        }

        let hash = self.credentials.hash(&cmd.password).await.map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            DomainError::new(ErrorCode::InternalError, "Failed to hash password")
        })?;

        let account = Account::register(cmd.account, hash, Timestamp::now())?;
        self.accounts.insert(&account).await?;

        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            registered_by = %cmd.actor.username,
            "Account registered"
        );
        Ok(account.id)
    }
}
