//! Notification channels
//!
//! An alert message and the transports that deliver it.

use serde::Serialize;
use std::future::Future;
use std::time::Duration;

use crate::error::{ConfigError, NotifyError};
use crate::event::RequestEvent;

/// Display name the alerts are posted under
pub const ALERT_USERNAME: &str = "SSRF Sheriff";

/// Alert as posted to a Slack-compatible incoming webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
    pub username: String,
    pub text: String,
    #[serde(rename = "mrkdwn")]
    pub markdown: bool,
}

impl AlertMessage {
    pub fn for_event(event: &RequestEvent) -> Self {
        Self {
            username: ALERT_USERNAME.to_string(),
            text: format!(
                "SSRF Hit from IP `{}` on path `{}` with headers `{}`",
                event.source,
                event.path,
                event.headers_display()
            ),
            markdown: true,
        }
    }
}

/// Destination for alert messages
pub trait NotificationChannel: Send + Sync + 'static {
    fn deliver(
        &self,
        message: &AlertMessage,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Slack-compatible incoming webhook
#[derive(Debug, Clone)]
pub struct SlackWebhook {
    client: reqwest::Client,
    url: String,
}

impl SlackWebhook {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ConfigError::NotifyClient)?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl NotificationChannel for SlackWebhook {
    async fn deliver(&self, message: &AlertMessage) -> Result<(), NotifyError> {
        let response = self.client.post(&self.url).json(message).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status(status.as_u16()))
        }
    }
}
