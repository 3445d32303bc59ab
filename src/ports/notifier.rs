//! Notification port.
//!
//! Notifications are best-effort: they never fail the operation that
//! triggered them. [`dispatch_best_effort`] runs delivery on its own task
//! and hands back a [`NotificationReceipt`] the caller may await or drop.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::domain::foundation::Timestamp;

/// Something worth telling a principal about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Login from a device that differs from the last recognised one.
    NewDeviceLogin {
        to: String,
        device: String,
        ip: String,
        at: Timestamp,
    },
    /// Premium was switched on.
    PremiumActivated { to: String, expiry: Timestamp },
}

/// A rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::NewDeviceLogin { .. } => "new_device_login",
            Notification::PremiumActivated { .. } => "premium_activated",
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Notification::NewDeviceLogin { to, .. } | Notification::PremiumActivated { to, .. } => to,
        }
    }

    pub fn render(&self) -> EmailMessage {
        match self {
            Notification::NewDeviceLogin { to, device, ip, at } => EmailMessage {
                to: to.clone(),
                subject: "Security Alert: New Login Detected".to_string(),
                html: format!(
                    "<p>A new login to your SROTS account was detected.</p>\
                     <ul><li>Device: {}</li><li>IP address: {}</li><li>Time: {}</li></ul>\
                     <p>If this wasn't you, reset your password and contact your placement admin.</p>",
                    device,
                    ip,
                    at.as_datetime().format("%Y-%m-%d %H:%M UTC")
                ),
            },
            Notification::PremiumActivated { to, expiry } => EmailMessage {
                to: to.clone(),
                subject: "Premium Activated".to_string(),
                html: format!(
                    "<p>Your SROTS premium access is now active.</p>\
                     <p>Valid until: <strong>{}</strong></p>",
                    expiry.to_date_string()
                ),
            },
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    #[error("Notifier misconfigured: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Final state of a best-effort notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Delivered,
    Failed(String),
}

/// Handle to an in-flight notification.
///
/// Dropping it does not cancel delivery.
#[derive(Debug)]
pub struct NotificationReceipt {
    handle: JoinHandle<NotificationOutcome>,
}

impl NotificationReceipt {
    /// Waits for delivery to finish. A panicked delivery task reads as `Failed`.
    pub async fn outcome(self) -> NotificationOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => NotificationOutcome::Failed(e.to_string()),
        }
    }
}

/// Spawns delivery of `notification` and returns immediately.
///
/// Failures are logged at warn level and reported only via the receipt.
pub fn dispatch_best_effort(
    notifier: Arc<dyn Notifier>,
    notification: Notification,
) -> NotificationReceipt {
    let handle = tokio::spawn(async move {
        match notifier.send(&notification).await {
            Ok(()) => {
                tracing::debug!(kind = notification.kind(), "Notification delivered");
                NotificationOutcome::Delivered
            }
            Err(e) => {
                tracing::warn!(
                    kind = notification.kind(),
                    error = %e,
                    "Notification delivery failed"
                );
                NotificationOutcome::Failed(e.to_string())
            }
        }
    });
    NotificationReceipt { handle }
}
