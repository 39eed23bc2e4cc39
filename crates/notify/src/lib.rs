//! Best-effort delivery of billing reports to a chat webhook.
//!
//! # Usage
//!
//! ```no_run
//! use billing_notify::Notifier;
//!
//! # async fn example() -> Result<(), url::ParseError> {
//! let url = url::Url::parse("https://hooks.slack.com/services/T000/B000/XXXX")?;
//! let notifier = Notifier::slack(url);
//!
//! // Never fails; the outcome is only for logging and reporting.
//! let outcome = notifier.post("this month's total billing is 42.50 USD").await;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`NotifyChannel`] trait defines the interface for notification channels
//! - [`SlackChannel`] posts `{"text": ...}` to an incoming webhook
//! - [`Notifier`] sends through one channel and turns the result into a
//!   [`DeliveryOutcome`] instead of an error

pub mod channels;
pub mod error;
pub mod outcome;

pub use channels::slack::SlackChannel;
pub use channels::NotifyChannel;
pub use error::ChannelError;
pub use outcome::DeliveryOutcome;

use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Notification dispatcher.
///
/// Sends each message once, with no retry, and never returns an error.
pub struct Notifier {
    channel: Option<Arc<dyn NotifyChannel>>,
}

impl Notifier {
    /// Create a notifier that sends through `channel`.
    #[must_use]
    pub fn new(channel: Arc<dyn NotifyChannel>) -> Self {
        Self {
            channel: Some(channel),
        }
    }

    /// Create a notifier posting to a Slack incoming webhook.
    #[must_use]
    pub fn slack(webhook_url: Url) -> Self {
        Self::new(Arc::new(SlackChannel::new(webhook_url)))
    }

    /// Create a disabled notifier (dry runs and tests).
    #[must_use]
    pub const fn disabled() -> Self {
        Self { channel: None }
    }

    /// Send `text` and log what happened.
    pub async fn post(&self, text: &str) -> DeliveryOutcome {
        let outcome = match &self.channel {
            None => DeliveryOutcome::Skipped,
            Some(channel) => {
                let name = channel.name();
                debug!(channel = name, "Posting notification");
                match channel.send(text).await {
                    Ok(status) => DeliveryOutcome::Delivered {
                        channel: name,
                        status,
                    },
                    Err(error) => DeliveryOutcome::Failed {
                        channel: name,
                        error,
                    },
                }
            }
        };

        outcome.log();
        outcome
    }
}
