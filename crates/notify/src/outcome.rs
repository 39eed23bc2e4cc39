//! Result of a best-effort delivery.

use reqwest::StatusCode;
use tracing::{error, info, warn};

use crate::error::ChannelError;

/// What happened to a notification.
///
/// This is reported and logged, never propagated as an error: delivery is
/// best-effort and must not fail the invocation.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The webhook answered; the status is not validated.
    Delivered {
        channel: &'static str,
        status: StatusCode,
    },
    /// No response was received.
    Failed {
        channel: &'static str,
        error: ChannelError,
    },
    /// Notifications are disabled.
    Skipped,
}

impl DeliveryOutcome {
    /// Whether the webhook returned any response.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Delivered { status, .. } => Some(*status),
            Self::Failed { .. } | Self::Skipped => None,
        }
    }

    /// Emit the log line for this outcome.
    pub fn log(&self) {
        match self {
            Self::Delivered { channel, status } if status.is_success() => {
                info!(
                    channel = *channel,
                    status = status.as_u16(),
                    "Notification delivered"
                );
            }
            Self::Delivered { channel, status } => {
                warn!(
                    channel = *channel,
                    status = status.as_u16(),
                    "Notification answered with error status"
                );
            }
            Self::Failed { channel, error } => {
                error!(channel = *channel, error = %error, "Failed to send notification");
            }
            Self::Skipped => info!("Notifications disabled, message not sent"),
        }
    }
}

impl std::fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivered { channel, status } => write!(f, "{channel}: {status}"),
            Self::Failed { channel, error } => write!(f, "{channel}: {error}"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}
