//! LoginHandler - Decides whether a principal may sign in.
//!
//! Order of checks:
//! 1. identifier resolves to an account
//! 2. account is not administratively restricted
//! 3. secret matches the stored hash (bounded by a timeout)
//! 4. for subscribers, the subscriber record exists and is not RESTRICTED
//!
//! A subscriber without effective premium still gets a token, flagged HOLD.
//! A login from an unrecognised device is recorded and alerted best-effort.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::domain::account::{Account, AccountStatus, DeviceContext};
use crate::domain::foundation::{AccountId, AuthenticatedUser, Role, Timestamp};
use crate::ports::{
    dispatch_best_effort, AccountStore, CredentialVerifier, Notification, NotificationReceipt,
    Notifier, TokenIssuer,
};

pub const LOGIN_SUCCESSFUL: &str = "Login successful";
pub const PREMIUM_REQUIRED: &str = "Premium required to access job features";
pub const RESTRICTED_BY_ADMIN: &str = "Your account has been restricted by admin";
pub const SUBSCRIBER_RESTRICTED: &str = "Your account is restricted. Contact admin.";

/// Command to sign in.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    /// Username or email.
    pub identifier: String,
    pub secret: String,
    pub device: DeviceContext,
}

/// Session handed back on a successful login.
#[derive(Debug)]
pub struct LoginSession {
    pub token: String,
    pub account_id: AccountId,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub college_id: Option<String>,
    pub account_status: AccountStatus,
    pub premium_active: bool,
    pub message: &'static str,
    /// New-device alert in flight, if one was sent.
    pub notification: Option<NotificationReceipt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    Restricted,
}

impl ForbiddenReason {
    /// Value reported as `accountStatus` to the client.
    pub fn as_str(&self) -> &'static str {
        match self {
            ForbiddenReason::Restricted => "RESTRICTED",
        }
    }
}

/// Result of a login attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    Authorized(LoginSession),
    /// Unknown identifier or wrong secret. Deliberately indistinguishable.
    Unauthorized,
    Forbidden {
        reason: ForbiddenReason,
        message: &'static str,
    },
}

/// Failures that are not a decision about the principal.
#[derive(Debug, Clone, Error)]
pub enum LoginError {
    /// SUBSCRIBER account without a subscriber record.
    #[error("Subscriber record missing for account {0}")]
    SubscriberRecordMissing(AccountId),

    /// Credential check or token issuance failed or timed out.
    #[error("Login dependency failed: {0}")]
    Dependency(String),

    #[error("Account storage failed: {0}")]
    Storage(String),
}

/// Handler for login attempts.
pub struct LoginHandler {
    accounts: Arc<dyn AccountStore>,
    credentials: Arc<dyn CredentialVerifier>,
    tokens: Arc<dyn TokenIssuer>,
    notifier: Arc<dyn Notifier>,
    credential_timeout: Duration,
}

impl LoginHandler {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        credentials: Arc<dyn CredentialVerifier>,
        tokens: Arc<dyn TokenIssuer>,
        notifier: Arc<dyn Notifier>,
        credential_timeout: Duration,
    ) -> Self {
        Self {
            accounts,
            credentials,
            tokens,
            notifier,
            credential_timeout,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginOutcome, LoginError> {
        let account = match self
            .accounts
            .find_by_identifier(&cmd.identifier)
            .await
            .map_err(|e| LoginError::Storage(e.to_string()))?
        {
            Some(account) => account,
            None => {
                tracing::info!("Login rejected: unknown identifier");
                return Ok(LoginOutcome::Unauthorized);
            }
        };

        if account.restricted {
            tracing::info!(account_id = %account.id, "Login rejected: account restricted");
            return Ok(LoginOutcome::Forbidden {
                reason: ForbiddenReason::Restricted,
                message: RESTRICTED_BY_ADMIN,
            });
        }

        if !self.verify_secret(&account, &cmd.secret).await? {
            tracing::info!(account_id = %account.id, "Login rejected: bad credentials");
            return Ok(LoginOutcome::Unauthorized);
        }

        let now = Timestamp::now();
        let (account_status, premium_active, message) = if account.is_subscriber() {
            let profile = match account.subscriber.as_ref() {
                Some(profile) => profile,
                None => {
                    tracing::error!(
                        account_id = %account.id,
                        "Data integrity: subscriber account has no subscriber record"
                    );
                    return Err(LoginError::SubscriberRecordMissing(account.id));
                }
            };
            if profile.account_status == AccountStatus::Restricted {
                tracing::info!(account_id = %account.id, "Login rejected: subscriber restricted");
                return Ok(LoginOutcome::Forbidden {
                    reason: ForbiddenReason::Restricted,
                    message: SUBSCRIBER_RESTRICTED,
                });
            }
            let premium = profile.premium_active_at(&now);
            let message = if premium {
                LOGIN_SUCCESSFUL
            } else {
                PREMIUM_REQUIRED
            };
            (AccountStatus::for_premium(premium), premium, message)
        } else {
            (AccountStatus::Active, false, LOGIN_SUCCESSFUL)
        };

        let user = AuthenticatedUser::new(account.id, account.username.clone(), account.role)
            .with_college(account.college_id.clone());
        let token = self
            .tokens
            .issue(&user)
            .map_err(|e| LoginError::Dependency(e.to_string()))?;

        let notification = self.track_device(&account, &cmd.device, now).await;

        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            status = %account_status,
            "Login authorized"
        );

        Ok(LoginOutcome::Authorized(LoginSession {
            token,
            account_id: account.id,
            username: account.username,
            full_name: account.full_name,
            role: account.role,
            college_id: account.college_id,
            account_status,
            premium_active,
            message,
            notification,
        }))
    }

    async fn verify_secret(&self, account: &Account, secret: &str) -> Result<bool, LoginError> {
        match tokio::time::timeout(
            self.credential_timeout,
            self.credentials.verify(secret, &account.credential_hash),
        )
        .await
        {
            Ok(Ok(matches)) => Ok(matches),
            Ok(Err(e)) => {
                tracing::error!(account_id = %account.id, error = %e, "Credential check failed");
                Err(LoginError::Dependency(e.to_string()))
            }
            Err(_) => {
                tracing::error!(account_id = %account.id, "Credential check timed out");
                Err(LoginError::Dependency("credential check timed out".to_string()))
            }
        }
    }

    /// Records a changed device and sends the alert. Never fails the login.
    async fn track_device(
        &self,
        account: &Account,
        device: &DeviceContext,
        now: Timestamp,
    ) -> Option<NotificationReceipt> {
        let fingerprint = device.fingerprint();
        if !account.is_new_device(&fingerprint) {
            return None;
        }

        if let Err(e) = self.accounts.record_device(account.id, &fingerprint, now).await {
            tracing::warn!(account_id = %account.id, error = %e, "Failed to record device");
        }

        Some(dispatch_best_effort(
            self.notifier.clone(),
            Notification::NewDeviceLogin {
                to: account.email.clone(),
                device: fingerprint.as_str().to_string(),
                ip: device.ip_or_unknown().to_string(),
                at: now,
            },
        ))
    }
}
