//! Notification channel implementations.

pub mod slack;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::ChannelError;

/// Trait for notification channels.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Send a plain-text message.
    ///
    /// Any HTTP response counts as sent and its status is returned; only
    /// transport failures are errors.
    async fn send(&self, text: &str) -> Result<StatusCode, ChannelError>;
}
