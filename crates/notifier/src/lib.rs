//! Monthly AWS billing notifier.
//!
//! Resolves the account, queries this month's unblended cost (total and per
//! service), formats a short summary and posts it to a Slack webhook. Meant to
//! be started once per day or month by an external scheduler; nothing is kept
//! between runs.
//!
//! - [`config`] - explicit invocation settings (webhook, region, reference date)
//! - [`message`] - summary formatting and rounding
//! - [`run`] - the fetch, format, post sequence

pub mod config;
pub mod message;
pub mod run;

pub use config::{Config, ConfigError, DEFAULT_REGION};
pub use message::{format_message, BillingMessage};
pub use run::{run, RunError, RunReport};
