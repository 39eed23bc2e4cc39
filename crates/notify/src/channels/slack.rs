//! Slack webhook notification channel.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::ChannelError;
use crate::NotifyChannel;

/// Slack incoming-webhook channel.
pub struct SlackChannel {
    webhook_url: Url,
    client: reqwest::Client,
}

impl SlackChannel {
    /// Create a Slack channel for a webhook URL.
    ///
    /// The client has no request timeout; the host environment bounds the
    /// invocation.
    #[must_use]
    pub fn new(webhook_url: Url) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotifyChannel for SlackChannel {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(&self, text: &str) -> Result<StatusCode, ChannelError> {
        debug!(channel = "slack", bytes = text.len(), "Sending notification");

        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&SlackPayload { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(
                channel = "slack",
                status = %status,
                body = %body,
                "Slack webhook response body"
            );
        }

        Ok(status)
    }
}

// =============================================================================
// Slack API types
// =============================================================================

#[derive(Debug, Serialize)]
struct SlackPayload<'a> {
    text: &'a str,
}
