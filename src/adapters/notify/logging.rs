//! Notifier that only logs. Used when no email provider is configured.

use async_trait::async_trait;

use crate::ports::{Notification, Notifier, NotifyError};

#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let email = notification.render();
        tracing::info!(
            kind = notification.kind(),
            to = %email.to,
            subject = %email.subject,
            "Email delivery disabled; notification logged"
        );
        Ok(())
    }
}
