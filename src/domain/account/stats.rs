//! Premium statistics over subscriber accounts.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::{Account, AccountStatus};

/// Snapshot of subscriber premium state at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberStats {
    pub total: u64,
    pub active: u64,
    pub expiring_in_30_days: u64,
    pub expiring_in_7_days: u64,
    pub expired: u64,
}

impl SubscriberStats {
    /// Tallies `accounts` at `now`. Non-subscribers are skipped.
    pub fn compute<'a>(accounts: impl IntoIterator<Item = &'a Account>, now: Timestamp) -> Self {
        let in_7 = now.add_days(7);
        let in_30 = now.add_days(30);
        let mut stats = Self::default();

        for profile in accounts.into_iter().filter_map(|a| a.subscriber.as_ref()) {
            stats.total += 1;

            if profile.premium_active_at(&now) {
                stats.active += 1;
                if let Some(expiry) = profile.premium_expiry {
                    if !expiry.is_after(&in_30) {
                        stats.expiring_in_30_days += 1;
                    }
                    if !expiry.is_after(&in_7) {
                        stats.expiring_in_7_days += 1;
                    }
                }
                continue;
            }

            let lapsed = profile
                .premium_expiry
                .map(|expiry| !expiry.is_after(&now))
                .unwrap_or(false);
            if profile.account_status == AccountStatus::Hold || lapsed {
                stats.expired += 1;
            }
        }

        stats
    }
}
