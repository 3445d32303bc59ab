//! In-memory account and order store.
//!
//! Both ports share one mutex so settlement can update an order and its
//! account under a single guard. Used for local runs without a database
//! and throughout the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::account::{Account, DeviceFingerprint, PremiumActivation, PremiumChange};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::domain::premium::{settle_order, Order, Settlement};
use crate::ports::{AccountStore, OrderStore};

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    orders: HashMap<String, Order>,
}

impl State {
    fn account_mut(&mut self, id: AccountId) -> Result<&mut Account, DomainError> {
        self.accounts.get_mut(&id).ok_or_else(|| account_not_found(id))
    }
}

fn account_not_found(id: AccountId) -> DomainError {
    DomainError::new(ErrorCode::AccountNotFound, "Account not found")
        .with_detail("account_id", id.to_string())
}

/// Mutex-guarded store implementing [`AccountStore`] and [`OrderStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked orders.
    pub async fn order_count(&self) -> usize {
        self.state.lock().await.orders.len()
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn insert(&self, account: &Account) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let taken = state.accounts.values().any(|existing| {
            existing.username == account.username
                || existing.email.eq_ignore_ascii_case(&account.email)
        });
        if taken || state.accounts.contains_key(&account.id) {
            return Err(DomainError::new(
                ErrorCode::AccountExists,
                "Username or email already registered",
            ));
        }
        state.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.state.lock().await.accounts.get(&id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError> {
        let identifier = identifier.trim();
        let state = self.state.lock().await;
        // An exact username match wins over an email match.
        let by_username = state
            .accounts
            .values()
            .find(|account| account.username == identifier);
        Ok(by_username
            .or_else(|| {
                state
                    .accounts
                    .values()
                    .find(|account| account.matches_identifier(identifier))
            })
            .cloned())
    }

    async fn record_device(
        &self,
        id: AccountId,
        fingerprint: &DeviceFingerprint,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let account = state.account_mut(id)?;
        account.last_device_fingerprint = Some(fingerprint.as_str().to_string());
        account.updated_at = now;
        Ok(())
    }

    async fn apply_premium(
        &self,
        id: AccountId,
        change: PremiumChange,
        now: Timestamp,
    ) -> Result<(Account, PremiumActivation), DomainError> {
        let mut state = self.state.lock().await;
        let account = state.account_mut(id)?;
        let activation = account.apply_premium(change, now)?;
        Ok((account.clone(), activation))
    }

    async fn set_restricted(
        &self,
        id: AccountId,
        restricted: bool,
        now: Timestamp,
    ) -> Result<Account, DomainError> {
        let mut state = self.state.lock().await;
        let account = state.account_mut(id)?;
        account.set_restricted(restricted, now);
        Ok(account.clone())
    }

    async fn list_subscribers(
        &self,
        college_id: Option<&str>,
    ) -> Result<Vec<Account>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .values()
            .filter(|account| account.is_subscriber())
            .filter(|account| college_id.is_none() || account.college_id.as_deref() == college_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        if state.orders.contains_key(&order.provider_order_id) {
            return Err(DomainError::new(
                ErrorCode::DuplicateOrder,
                "Provider order id already tracked",
            )
            .with_detail("provider_order_id", order.provider_order_id.clone()));
        }
        state
            .orders
            .insert(order.provider_order_id.clone(), order.clone());
        Ok(())
    }

    async fn find_by_provider_order_id(
        &self,
        provider_order_id: &str,
    ) -> Result<Option<Order>, DomainError> {
        Ok(self.state.lock().await.orders.get(provider_order_id).cloned())
    }

    async fn settle(
        &self,
        provider_order_id: &str,
        provider_payment_id: &str,
        now: Timestamp,
    ) -> Result<Settlement, DomainError> {
        let mut state = self.state.lock().await;

        let mut order = state
            .orders
            .get(provider_order_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(ErrorCode::OrderNotFound, "Order not found")
                    .with_detail("provider_order_id", provider_order_id.to_string())
            })?;
        if order.is_paid() {
            return Ok(Settlement::AlreadyPaid);
        }
        let mut account = state
            .accounts
            .get(&order.account_id)
            .cloned()
            .ok_or_else(|| account_not_found(order.account_id))?;

        let settlement = settle_order(&mut order, &mut account, provider_payment_id, now)?;

        state.orders.insert(order.provider_order_id.clone(), order);
        state.accounts.insert(account.id, account);
        Ok(settlement)
    }
}
