//! ToggleRestrictionHandler - Admin blocks or unblocks an account.
//!
//! A college admin may only toggle subscribers of its own college.

use std::sync::Arc;

use crate::domain::account::Account;
use crate::domain::foundation::{
    require_admin, require_admin_over, AccountId, AuthenticatedUser, DomainError, ErrorCode,
    Timestamp,
};
use crate::ports::AccountStore;

#[derive(Debug, Clone)]
pub struct ToggleRestrictionCommand {
    pub actor: AuthenticatedUser,
    pub account_id: AccountId,
    pub restricted: bool,
}

pub struct ToggleRestrictionHandler {
    accounts: Arc<dyn AccountStore>,
}

impl ToggleRestrictionHandler {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, cmd: ToggleRestrictionCommand) -> Result<Account, DomainError> {
        require_admin(&cmd.actor, "toggle_restriction").into_result()?;

        let target = self.accounts.find_by_id(cmd.account_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::AccountNotFound, "Account not found")
                .with_detail("account_id", cmd.account_id.to_string())
        })?;
        require_admin_over(
            &cmd.actor,
            target.role,
            target.college_id.as_deref(),
            "toggle_restriction",
        )
        .into_result()?;

        let account = self
            .accounts
            .set_restricted(cmd.account_id, cmd.restricted, Timestamp::now())
            .await?;

        tracing::info!(
            account_id = %account.id,
            restricted = account.restricted,
            by = %cmd.actor.username,
            "Account restriction updated"
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::account::{AccountStatus, NewAccount, PremiumChange};
    use crate::domain::foundation::Role;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "admin", Role::Admin)
    }

    fn college_admin(college: &str) -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "dean", Role::CollegeAdmin)
            .with_college(Some(college.to_string()))
    }

    async fn seed_account(
        store: &InMemoryStore,
        username: &str,
        role: Role,
        college: Option<&str>,
    ) -> Account {
        let account = Account::register(
            NewAccount {
                username: username.to_string(),
                email: format!("{}@college.edu", username),
                full_name: format!("{} Kumar", username),
                role,
                college_id: college.map(str::to_string),
            },
            "hash".to_string(),
            Timestamp::now(),
        )
        .unwrap();
        store.insert(&account).await.unwrap();
        account
    }

    async fn seed(store: &InMemoryStore, premium: bool) -> Account {
        let mut account = Account::register(
            NewAccount {
                username: "asha".to_string(),
                email: "asha@college.edu".to_string(),
                full_name: "Asha Kumar".to_string(),
                role: Role::Subscriber,
                college_id: Some("CLG-1".to_string()),
            },
            "hash".to_string(),
            Timestamp::now(),
        )
        .unwrap();
        if premium {
            account
                .apply_premium(PremiumChange::ActivateIfInactive { months: 6 }, Timestamp::now())
                .unwrap();
        }
        store.insert(&account).await.unwrap();
        account
    }

    fn status(account: &Account) -> AccountStatus {
        account.subscriber.as_ref().unwrap().account_status
    }

    #[tokio::test]
    async fn restricting_sets_flag_and_status() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed(&store, true).await;
        let handler = ToggleRestrictionHandler::new(store);

        let updated = handler
            .handle(ToggleRestrictionCommand {
                actor: admin(),
                account_id: account.id,
                restricted: true,
            })
            .await
            .unwrap();

        assert!(updated.restricted);
        assert_eq!(status(&updated), AccountStatus::Restricted);
    }

    #[tokio::test]
    async fn unrestricting_recomputes_status_from_premium() {
        let store = Arc::new(InMemoryStore::new());
        let premium = seed(&store, true).await;
        let handler = ToggleRestrictionHandler::new(store.clone());

        for restricted in [true, false] {
            handler
                .handle(ToggleRestrictionCommand {
                    actor: admin(),
                    account_id: premium.id,
                    restricted,
                })
                .await
                .unwrap();
        }

        let stored = store.find_by_id(premium.id).await.unwrap().unwrap();
        assert!(!stored.restricted);
        assert_eq!(status(&stored), AccountStatus::Active);
    }

    #[tokio::test]
    async fn unrestricting_without_premium_is_hold() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed(&store, false).await;
        let handler = ToggleRestrictionHandler::new(store);

        let updated = handler
            .handle(ToggleRestrictionCommand {
                actor: admin(),
                account_id: account.id,
                restricted: false,
            })
            .await
            .unwrap();

        assert_eq!(status(&updated), AccountStatus::Hold);
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let handler = ToggleRestrictionHandler::new(Arc::new(InMemoryStore::new()));

        let err = handler
            .handle(ToggleRestrictionCommand {
                actor: admin(),
                account_id: AccountId::new(),
                restricted: true,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AccountNotFound);
    }

    #[tokio::test]
    async fn subscriber_cannot_restrict() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed(&store, false).await;
        let handler = ToggleRestrictionHandler::new(store);

        let err = handler
            .handle(ToggleRestrictionCommand {
                actor: AuthenticatedUser::new(account.id, "asha", Role::Subscriber),
                account_id: account.id,
                restricted: false,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn college_admin_restricts_own_subscriber() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed(&store, false).await;
        let handler = ToggleRestrictionHandler::new(store);

        let updated = handler
            .handle(ToggleRestrictionCommand {
                actor: college_admin("CLG-1"),
                account_id: account.id,
                restricted: true,
            })
            .await
            .unwrap();

        assert!(updated.restricted);
    }

    #[tokio::test]
    async fn college_admin_cannot_touch_other_college() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed(&store, false).await;
        let handler = ToggleRestrictionHandler::new(store.clone());

        let err = handler
            .handle(ToggleRestrictionCommand {
                actor: college_admin("CLG-2"),
                account_id: account.id,
                restricted: true,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        let stored = store.find_by_id(account.id).await.unwrap().unwrap();
        assert!(!stored.restricted);
    }

    #[tokio::test]
    async fn college_admin_cannot_lock_out_platform_admin() {
        let store = Arc::new(InMemoryStore::new());
        let root = seed_account(&store, "root", Role::Admin, Some("CLG-1")).await;
        let handler = ToggleRestrictionHandler::new(store.clone());

        let err = handler
            .handle(ToggleRestrictionCommand {
                actor: college_admin("CLG-1"),
                account_id: root.id,
                restricted: true,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        let stored = store.find_by_id(root.id).await.unwrap().unwrap();
        assert!(!stored.restricted);
    }
}
