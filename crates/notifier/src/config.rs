//! Invocation configuration.
//!
//! Everything the run needs from the environment is resolved once at startup
//! into a [`Config`] and passed down explicitly.

use billing_cost::{BillingPeriod, CostProviderError};
use chrono::NaiveDate;
use thiserror::Error;
use url::Url;

/// Region for the STS and Cost Explorer clients.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration errors. All are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Webhook URL is empty
    #[error("SLACK_WEBHOOK_URL is not set")]
    MissingWebhookUrl,

    /// Webhook URL does not parse
    #[error("invalid webhook URL: {0}")]
    InvalidWebhookUrl(#[from] url::ParseError),

    /// Webhook URL is not http(s)
    #[error("webhook URL must be http or https, got {0:?}")]
    UnsupportedScheme(String),

    /// Reference date has no billing period
    #[error(transparent)]
    Period(#[from] CostProviderError),
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Webhook the report is posted to.
    pub webhook_url: Url,
    /// AWS region for the SDK clients.
    pub region: String,
    /// Local calendar date the billing month is derived from.
    pub today: NaiveDate,
    /// Build and log the report without posting it.
    pub dry_run: bool,
}

impl Config {
    /// Validate and build a configuration.
    pub fn new(
        webhook_url: &str,
        region: impl Into<String>,
        today: NaiveDate,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            webhook_url: parse_webhook_url(webhook_url)?,
            region: region.into(),
            today,
            dry_run: false,
        })
    }

    /// Enable or disable dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Billing period containing [`Config::today`].
    pub fn period(&self) -> Result<BillingPeriod, ConfigError> {
        Ok(BillingPeriod::containing(self.today)?)
    }
}

/// Parse a webhook URL, accepting only http and https.
pub fn parse_webhook_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::MissingWebhookUrl);
    }

    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    #[test]
    fn test_valid_config() {
        let config = Config::new(
            "https://hooks.slack.com/services/T000/B000/XXXX",
            DEFAULT_REGION,
            today(),
        )
        .unwrap();

        assert_eq!(config.webhook_url.host_str(), Some("hooks.slack.com"));
        assert_eq!(config.region, "us-east-1");
        assert!(!config.dry_run);
        assert!(config.with_dry_run(true).dry_run);
    }

    #[test]
    fn test_period_from_today() {
        let config = Config::new("https://example.com/hook", DEFAULT_REGION, today()).unwrap();
        let period = config.period().unwrap();
        assert_eq!(period.start_iso(), "2024-02-01");
        assert_eq!(period.end_iso(), "2024-03-01");
    }

    #[test]
    fn test_empty_webhook_is_missing() {
        let err = Config::new("  ", DEFAULT_REGION, today()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingWebhookUrl));
        assert_eq!(err.to_string(), "SLACK_WEBHOOK_URL is not set");
    }

    #[test]
    fn test_unparsable_webhook() {
        let err = parse_webhook_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWebhookUrl(_)));
    }

    #[test]
    fn test_non_http_webhook() {
        let err = parse_webhook_url("ftp://example.com/hook").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(ref s) if s == "ftp"));
    }
}
