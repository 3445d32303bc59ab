//! ActivateDirectHandler - Grants premium from a manually entered UTR.
//!
//! Bank-transfer customers submit the UTR they were given. The reference
//! is format-checked only; no order is created or consulted.

use std::sync::Arc;

use crate::domain::account::PremiumActivation;
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::domain::premium::{ActivationSource, TransactionReference, INVALID_UTR_MESSAGE};
use crate::ports::{dispatch_best_effort, AccountStore, Notification, NotificationReceipt, Notifier};

pub const PREMIUM_ACTIVATED: &str = "Premium activated successfully";
pub const PREMIUM_ALREADY_ACTIVE: &str = "Premium is already active";

#[derive(Debug, Clone)]
pub struct ActivateDirectCommand {
    pub account_id: AccountId,
    /// Unique Transaction Reference as typed by the user.
    pub utr: String,
}

#[derive(Debug)]
pub struct DirectActivationResult {
    pub activation: PremiumActivation,
    pub message: &'static str,
    pub notification: Option<NotificationReceipt>,
}

pub struct ActivateDirectHandler {
    accounts: Arc<dyn AccountStore>,
    notifier: Arc<dyn Notifier>,
}

impl ActivateDirectHandler {
    pub fn new(accounts: Arc<dyn AccountStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { accounts, notifier }
    }

    pub async fn handle(
        &self,
        cmd: ActivateDirectCommand,
    ) -> Result<DirectActivationResult, DomainError> {
        let utr = TransactionReference::parse(&cmd.utr)
            .map_err(|_| DomainError::validation("utr", INVALID_UTR_MESSAGE))?;

        let (account, activation) = self
            .accounts
            .apply_premium(cmd.account_id, ActivationSource::Direct.change(), Timestamp::now())
            .await
            .map_err(|e| match e.code {
                ErrorCode::AccountNotFound => {
                    DomainError::new(ErrorCode::SubscriberNotFound, "Subscriber record not found")
                        .with_detail("account_id", cmd.account_id.to_string())
                }
                _ => e,
            })?;

        let (message, notification) = match activation {
            PremiumActivation::Applied { expiry } => {
                tracing::info!(
                    account_id = %account.id,
                    utr = %utr.as_str(),
                    expiry = %expiry.to_date_string(),
                    "Premium activated from UTR"
                );
                let receipt = dispatch_best_effort(
                    self.notifier.clone(),
                    Notification::PremiumActivated {
                        to: account.email.clone(),
                        expiry,
                    },
                );
                (PREMIUM_ACTIVATED, Some(receipt))
            }
            PremiumActivation::AlreadyActive { .. } => {
                tracing::info!(account_id = %account.id, "UTR submitted for already-active premium");
                (PREMIUM_ALREADY_ACTIVE, None)
            }
        };

        Ok(DirectActivationResult {
            activation,
            message,
            notification,
        })
    }
}
