//! AccountStatsHandler - Premium counts for the admin dashboard.
//!
//! Platform-wide for ADMIN, own college only for COLLEGE_ADMIN.

use std::sync::Arc;

use crate::domain::account::SubscriberStats;
use crate::domain::foundation::{admin_college_scope, AuthenticatedUser, DomainError, Timestamp};
use crate::ports::AccountStore;

#[derive(Debug, Clone)]
pub struct AccountStatsQuery {
    pub actor: AuthenticatedUser,
}

pub struct AccountStatsHandler {
    accounts: Arc<dyn AccountStore>,
}

impl AccountStatsHandler {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, query: AccountStatsQuery) -> Result<SubscriberStats, DomainError> {
        let college_id = admin_college_scope(&query.actor, "account_stats")?;

        let subscribers = self.accounts.list_subscribers(college_id).await?;
        Ok(SubscriberStats::compute(&subscribers, Timestamp::now()))
    }
}
