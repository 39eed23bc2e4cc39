//! Billing notifier CLI - posts this month's AWS bill to Slack.

use anyhow::{Context, Result};
use billing_cost::providers::aws::load_sdk_config;
use billing_cost::{AwsCostExplorer, AwsIdentity};
use billing_notifier::{run, Config, DEFAULT_REGION};
use billing_notify::Notifier;
use chrono::{Local, NaiveDate};
use clap::builder::BoolishValueParser;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Billing notifier - monthly AWS cost summary for Slack.
#[derive(Parser, Debug)]
#[command(name = "billing-notifier")]
#[command(about = "Post the current month's AWS bill to a Slack webhook", version)]
struct Cli {
    /// Slack incoming webhook URL (or set `SLACK_WEBHOOK_URL` env var).
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    webhook_url: String,

    /// Region for the STS and Cost Explorer clients.
    #[arg(long, env = "COST_EXPLORER_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Reference date (YYYY-MM-DD); defaults to today's local date.
    #[arg(long, env = "BILLING_DATE")]
    date: Option<NaiveDate>,

    /// Build and log the report without posting it.
    #[arg(long, env = "NOTIFY_DISABLED", value_parser = BoolishValueParser::new())]
    dry_run: bool,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, env = "LOG_JSON", value_parser = BoolishValueParser::new())]
    log_json: bool,
}

/// Install the global subscriber. `RUST_LOG` overrides the defaults.
fn init_tracing(verbose: bool, json: bool) {
    let default_directives = if verbose {
        "billing_notifier=debug,billing_cost=debug,billing_notify=debug,info"
    } else {
        "billing_notifier=info,billing_cost=info,billing_notify=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let config = Config::new(&cli.webhook_url, cli.region, today)
        .context("Invalid configuration")?
        .with_dry_run(cli.dry_run);

    let sdk_config = load_sdk_config(config.region.clone()).await;
    let identity = AwsIdentity::from_conf(&sdk_config);
    let costs = AwsCostExplorer::from_conf(&sdk_config);
    let notifier = if config.dry_run {
        Notifier::disabled()
    } else {
        Notifier::slack(config.webhook_url.clone())
    };

    let report = run(&config, &identity, &costs, &notifier)
        .await
        .context("Billing report failed")?;

    if config.dry_run {
        println!("{}", report.message);
    }

    info!(
        account_id = %report.account_id,
        period = %report.period,
        delivery = %report.delivery,
        "Done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const WEBHOOK: &str = "https://hooks.slack.com/services/T000/B000/XXXX";

    fn clear_env() {
        for var in [
            "SLACK_WEBHOOK_URL",
            "COST_EXPLORER_REGION",
            "BILLING_DATE",
            "NOTIFY_DISABLED",
            "LOG_JSON",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let cli = Cli::try_parse_from(["billing-notifier", "--webhook-url", WEBHOOK]).unwrap();

        assert_eq!(cli.webhook_url, WEBHOOK);
        assert_eq!(cli.region, "us-east-1");
        assert_eq!(cli.date, None);
        assert!(!cli.dry_run);
        assert!(!cli.log_json);
    }

    #[test]
    #[serial]
    fn test_webhook_is_required() {
        clear_env();
        assert!(Cli::try_parse_from(["billing-notifier"]).is_err());
    }

    #[test]
    #[serial]
    fn test_environment_configuration() {
        clear_env();
        std::env::set_var("SLACK_WEBHOOK_URL", WEBHOOK);
        std::env::set_var("BILLING_DATE", "2024-12-10");
        std::env::set_var("NOTIFY_DISABLED", "1");

        let cli = Cli::try_parse_from(["billing-notifier"]).unwrap();
        clear_env();

        assert_eq!(cli.webhook_url, WEBHOOK);
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 12, 10));
        assert!(cli.dry_run);
    }

    #[test]
    #[serial]
    fn test_flags() {
        clear_env();
        let cli = Cli::try_parse_from([
            "billing-notifier",
            "--webhook-url",
            WEBHOOK,
            "--region",
            "eu-west-1",
            "--date",
            "2024-02-15",
            "--dry-run",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.region, "eu-west-1");
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 2, 15));
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    #[serial]
    fn test_invalid_date_is_rejected() {
        clear_env();
        let result =
            Cli::try_parse_from(["billing-notifier", "--webhook-url", WEBHOOK, "--date", "soon"]);
        assert!(result.is_err());
    }
}
