//! Account store port.
//!
//! Every method that reads then writes premium or restriction state is a
//! single atomic operation in the adapter, scoped to one account. Callers
//! never load, mutate and save those fields themselves.

use async_trait::async_trait;

use crate::domain::account::{Account, DeviceFingerprint, PremiumActivation, PremiumChange};
use crate::domain::foundation::{AccountId, DomainError, Timestamp};

/// Persistence for [`Account`] records.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// `AccountExists` if the username or email is taken.
    async fn insert(&self, account: &Account) -> Result<(), DomainError>;

    /// Find by account id.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    /// Find by username, or by email (case-insensitive).
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError>;

    /// Overwrite the last recognised device. Plain write, no serialization.
    async fn record_device(
        &self,
        id: AccountId,
        fingerprint: &DeviceFingerprint,
        now: Timestamp,
    ) -> Result<(), DomainError>;

    /// Atomically apply a premium change via [`Account::apply_premium`].
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown id, `SubscriberNotFound` if the
    /// account has no subscriber record.
    async fn apply_premium(
        &self,
        id: AccountId,
        change: PremiumChange,
        now: Timestamp,
    ) -> Result<(Account, PremiumActivation), DomainError>;

    /// Atomically set or clear the restriction via [`Account::set_restricted`].
    async fn set_restricted(
        &self,
        id: AccountId,
        restricted: bool,
        now: Timestamp,
    ) -> Result<Account, DomainError>;

    /// Subscriber accounts for reporting, limited to `college_id` when given.
    async fn list_subscribers(
        &self,
        college_id: Option<&str>,
    ) -> Result<Vec<Account>, DomainError>;
}
