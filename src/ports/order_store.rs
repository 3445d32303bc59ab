//! Order store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::premium::{Order, Settlement};

/// Persistence for payment [`Order`]s.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a CREATED order.
    ///
    /// # Errors
    ///
    /// `DuplicateOrder` if the provider order id is already tracked.
    async fn insert(&self, order: &Order) -> Result<(), DomainError>;

    async fn find_by_provider_order_id(
        &self,
        provider_order_id: &str,
    ) -> Result<Option<Order>, DomainError>;

    /// Settle the order and its owning account as one atomic unit.
    ///
    /// Implementations lock the order (then the account), re-check the
    /// status, run [`crate::domain::premium::settle_order`] and persist
    /// both records before releasing. Concurrent calls for the same order
    /// therefore see exactly one `Settlement::Paid`.
    ///
    /// # Errors
    ///
    /// `OrderNotFound`, `AccountNotFound` or `SubscriberNotFound`.
    async fn settle(
        &self,
        provider_order_id: &str,
        provider_payment_id: &str,
        now: Timestamp,
    ) -> Result<Settlement, DomainError>;
}
