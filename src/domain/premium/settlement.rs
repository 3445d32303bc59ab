//! Order settlement: the CREATED -> PAID transition plus its premium effect.
//!
//! Store adapters call [`settle_order`] while holding the order (and its
//! account) exclusively, which makes the status check and both writes a
//! single atomic unit.

use crate::domain::account::{Account, PremiumActivation};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

use super::{ActivationSource, Order};

/// Outcome of settling an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Order was already PAID; nothing was written.
    AlreadyPaid,
    /// Order moved to PAID. `activation` says whether premium fields changed.
    Paid {
        order: Order,
        account: Account,
        activation: PremiumActivation,
    },
}

/// Marks `order` PAID and grants webhook premium to `account`.
///
/// An already-PAID order returns [`Settlement::AlreadyPaid`] without
/// touching either record. If premium is already in force the order is
/// still marked PAID and the premium fields are left alone.
pub fn settle_order(
    order: &mut Order,
    account: &mut Account,
    provider_payment_id: &str,
    now: Timestamp,
) -> Result<Settlement, DomainError> {
    if order.is_paid() {
        return Ok(Settlement::AlreadyPaid);
    }
    if order.account_id != account.id {
        return Err(DomainError::new(
            ErrorCode::InternalError,
            "Order does not belong to the supplied account",
        )
        .with_detail("provider_order_id", order.provider_order_id.clone()));
    }

    // Apply to copies first so a failure leaves both records untouched.
    let mut next_order = order.clone();
    let mut next_account = account.clone();

    next_order.mark_paid(provider_payment_id, now).map_err(|e| {
        DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
    })?;
    let activation = next_account.apply_premium(ActivationSource::Webhook.change(), now)?;

    *order = next_order;
    *account = next_account;

    Ok(Settlement::Paid {
        order: order.clone(),
        account: account.clone(),
        activation,
    })
}
