//! Account aggregate.
//!
//! One account per principal. Subscribers additionally carry a
//! [`SubscriberProfile`] holding premium state. Every premium mutation
//! goes through [`Account::apply_premium`] so the webhook, direct
//! activation and renewal paths share the same guard.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AccountId, DomainError, ErrorCode, Role, Timestamp, ValidationError,
};

use super::{AccountStatus, DeviceFingerprint};

/// Premium-eligible extension of a subscriber account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberProfile {
    /// Stored flag. Not authoritative on its own; see [`Self::premium_active_at`].
    pub premium_active: bool,
    pub premium_expiry: Option<Timestamp>,
    pub account_status: AccountStatus,
}

impl SubscriberProfile {
    /// Profile for a freshly registered subscriber.
    pub fn on_hold() -> Self {
        Self {
            premium_active: false,
            premium_expiry: None,
            account_status: AccountStatus::Hold,
        }
    }

    /// Effective premium state: the flag AND an expiry strictly after `now`.
    ///
    /// Expiry is evaluated lazily, so a stale `true` flag past its expiry
    /// reads as inactive.
    pub fn premium_active_at(&self, now: &Timestamp) -> bool {
        self.premium_active
            && self
                .premium_expiry
                .map(|expiry| expiry.is_after(now))
                .unwrap_or(false)
    }
}

/// Requested change to a subscriber's premium fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumChange {
    /// Grant `months` from now unless premium is already in force.
    ActivateIfInactive { months: u32 },
    /// Add `months` to whichever is later, now or the current expiry.
    Extend { months: u32 },
}

/// Result of applying a [`PremiumChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumActivation {
    /// Premium fields were written.
    Applied { expiry: Timestamp },
    /// Premium was already in force; nothing changed.
    AlreadyActive { expiry: Option<Timestamp> },
}

impl PremiumActivation {
    pub fn was_applied(&self) -> bool {
        matches!(self, PremiumActivation::Applied { .. })
    }
}

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub college_id: Option<String>,
}

/// A principal's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub college_id: Option<String>,
    pub role: Role,
    /// Administrative block. When set, login is refused regardless of any other state.
    pub restricted: bool,
    /// Argon2 PHC string.
    pub credential_hash: String,
    pub last_device_fingerprint: Option<String>,
    /// Present for subscribers whose extended record exists.
    pub subscriber: Option<SubscriberProfile>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Registers a new account with an already-hashed credential.
    ///
    /// Subscribers start on HOLD with no premium.
    pub fn register(
        input: NewAccount,
        credential_hash: String,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let username = input.username.trim().to_string();
        if username.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        let email = input.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        let full_name = input.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ValidationError::empty_field("full_name"));
        }

        let subscriber = match input.role {
            Role::Subscriber => Some(SubscriberProfile::on_hold()),
            _ => None,
        };

        Ok(Self {
            id: AccountId::new(),
            username,
            email,
            full_name,
            college_id: input.college_id.filter(|c| !c.trim().is_empty()),
            role: input.role,
            restricted: false,
            credential_hash,
            last_device_fingerprint: None,
            subscriber,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if `identifier` names this account by username or email.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.username == identifier || self.email.eq_ignore_ascii_case(identifier)
    }

    pub fn is_subscriber(&self) -> bool {
        self.role == Role::Subscriber
    }

    /// Effective premium at `now`. Always false for non-subscribers.
    pub fn premium_active_at(&self, now: &Timestamp) -> bool {
        self.subscriber
            .as_ref()
            .map(|profile| profile.premium_active_at(now))
            .unwrap_or(false)
    }

    /// Applies a premium change under the "set only if not already active" guard.
    ///
    /// # Errors
    ///
    /// `SubscriberNotFound` if the account has no subscriber record.
    pub fn apply_premium(
        &mut self,
        change: PremiumChange,
        now: Timestamp,
    ) -> Result<PremiumActivation, DomainError> {
        let restricted = self.restricted;
        let profile = self.subscriber.as_mut().ok_or_else(|| {
            DomainError::new(ErrorCode::SubscriberNotFound, "Subscriber record not found")
                .with_detail("account_id", self.id.to_string())
        })?;

        let expiry = match change {
            PremiumChange::ActivateIfInactive { months } => {
                if profile.premium_active_at(&now) {
                    return Ok(PremiumActivation::AlreadyActive {
                        expiry: profile.premium_expiry,
                    });
                }
                now.add_months(months)
            }
            PremiumChange::Extend { months } => {
                let base = profile
                    .premium_expiry
                    .filter(|expiry| profile.premium_active && expiry.is_after(&now))
                    .unwrap_or(now);
                base.add_months(months)
            }
        };

        profile.premium_active = true;
        profile.premium_expiry = Some(expiry);
        profile.account_status = if restricted {
            AccountStatus::Restricted
        } else {
            AccountStatus::Active
        };
        self.updated_at = now;

        Ok(PremiumActivation::Applied { expiry })
    }

    /// Sets or clears the administrative restriction.
    ///
    /// Subscriber status follows: RESTRICTED while restricted, otherwise
    /// recomputed from effective premium.
    pub fn set_restricted(&mut self, restricted: bool, now: Timestamp) {
        self.restricted = restricted;
        if let Some(profile) = self.subscriber.as_mut() {
            profile.account_status = if restricted {
                AccountStatus::Restricted
            } else {
                AccountStatus::for_premium(profile.premium_active_at(&now))
            };
        }
        self.updated_at = now;
    }

    /// Returns true if `fingerprint` differs from the last recognised device.
    pub fn is_new_device(&self, fingerprint: &DeviceFingerprint) -> bool {
        self.last_device_fingerprint.as_deref() != Some(fingerprint.as_str())
    }
}
