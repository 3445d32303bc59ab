//! Resend email notifier.
//!
//! Renders a [`Notification`] and POSTs it to the Resend `/emails` API.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::ports::{Notification, Notifier, NotifyError};

const RESEND_API_URL: &str = "https://api.resend.com";

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Sends email through Resend.
pub struct ResendNotifier {
    api_key: SecretString,
    from_header: String,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl ResendNotifier {
    pub fn new(
        api_key: SecretString,
        from_header: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Configuration(e.to_string()))?;
        Ok(Self {
            api_key,
            from_header: from_header.into(),
            api_base_url: RESEND_API_URL.to_string(),
            http_client,
        })
    }

    /// Override the API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl std::fmt::Debug for ResendNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendNotifier")
            .field("from_header", &self.from_header)
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let email = notification.render();
        let body = SendEmailBody {
            from: &self.from_header,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .http_client
            .post(format!("{}/emails", self.api_base_url.trim_end_matches('/')))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Resend send failed");
            return Err(NotifyError::Delivery(format!(
                "Resend returned {}: {}",
                status, error_text
            )));
        }

        tracing::info!(kind = notification.kind(), "Email sent");
        Ok(())
    }
}
