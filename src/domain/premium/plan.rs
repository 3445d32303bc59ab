//! Premium grant durations and renewal plans.

use serde::{Deserialize, Serialize};

use crate::domain::account::PremiumChange;
use crate::domain::foundation::ValidationError;

/// Months granted by a captured online payment.
pub const WEBHOOK_GRANT_MONTHS: u32 = 6;

/// Months granted by a manually confirmed bank transfer.
pub const DIRECT_GRANT_MONTHS: u32 = 12;

/// Bounds for an administrative renewal.
pub const MIN_RENEWAL_MONTHS: u32 = 1;
pub const MAX_RENEWAL_MONTHS: u32 = 24;

/// How premium was obtained. Determines the grant length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    Webhook,
    Direct,
}

impl ActivationSource {
    pub fn months(&self) -> u32 {
        match self {
            ActivationSource::Webhook => WEBHOOK_GRANT_MONTHS,
            ActivationSource::Direct => DIRECT_GRANT_MONTHS,
        }
    }

    /// Guarded activation: no-op while premium is in force.
    pub fn change(&self) -> PremiumChange {
        PremiumChange::ActivateIfInactive {
            months: self.months(),
        }
    }
}

/// Renewal plans offered to colleges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenewalPlan {
    Quarterly,
    HalfYearly,
    Yearly,
}

impl RenewalPlan {
    pub fn months(&self) -> u32 {
        match self {
            RenewalPlan::Quarterly => 3,
            RenewalPlan::HalfYearly => 6,
            RenewalPlan::Yearly => 12,
        }
    }

    /// List price in rupees.
    pub fn price_inr(&self) -> u32 {
        match self {
            RenewalPlan::Quarterly => 199,
            RenewalPlan::HalfYearly => 349,
            RenewalPlan::Yearly => 599,
        }
    }
}

/// Validates an administrative renewal length and builds the change.
pub fn renewal_change(months: u32) -> Result<PremiumChange, ValidationError> {
    if !(MIN_RENEWAL_MONTHS..=MAX_RENEWAL_MONTHS).contains(&months) {
        return Err(ValidationError::out_of_range(
            "months",
            i64::from(MIN_RENEWAL_MONTHS),
            i64::from(MAX_RENEWAL_MONTHS),
            i64::from(months),
        ));
    }
    Ok(PremiumChange::Extend { months })
}
