//! One billing report invocation.

use billing_cost::{BillingPeriod, CostProvider, CostProviderError, IdentityProvider};
use billing_notify::{DeliveryOutcome, Notifier};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::message::{format_message, BillingMessage};

/// Fatal failures of a run. Delivery problems are not errors.
#[derive(Debug, Error)]
pub enum RunError {
    /// Billing period could not be derived
    #[error("invalid configuration")]
    Config(#[source] ConfigError),

    /// Account lookup failed
    #[error("failed to resolve account id")]
    Identity(#[source] CostProviderError),

    /// Total cost query failed
    #[error("failed to query total cost")]
    TotalCost(#[source] CostProviderError),

    /// Per-service cost query failed
    #[error("failed to query service costs")]
    ServiceCosts(#[source] CostProviderError),
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunReport {
    /// Account the costs belong to.
    pub account_id: String,
    /// Period that was queried.
    pub period: BillingPeriod,
    /// Message that was (or would have been) posted.
    pub message: BillingMessage,
    /// Delivery result, for reporting only.
    pub delivery: DeliveryOutcome,
}

/// Fetch this month's costs, format the summary and post it.
///
/// Identity and cost failures abort the run before anything is posted. A
/// failed post is logged and reported in [`RunReport::delivery`] but the run
/// still succeeds.
pub async fn run(
    config: &Config,
    identity: &dyn IdentityProvider,
    costs: &dyn CostProvider,
    notifier: &Notifier,
) -> Result<RunReport, RunError> {
    let period = config.period().map_err(RunError::Config)?;
    info!(period = %period, provider = costs.name(), "Building billing report");

    let account_id = identity.account_id().await.map_err(RunError::Identity)?;
    debug!(account_id = %account_id, "Resolved account");

    let total = costs
        .total_cost(&period)
        .await
        .map_err(RunError::TotalCost)?;
    let services = costs
        .service_costs(&period)
        .await
        .map_err(RunError::ServiceCosts)?;
    debug!(services = services.len(), "Fetched service costs");

    let message = format_message(&account_id, &total, &services);
    info!(
        account_id = %account_id,
        total = %total.rounded(),
        unit = %total.unit,
        lines = message.lines().len(),
        "Billing report ready"
    );
    debug!(message = %message, "Report text");

    let delivery = notifier.post(&message.text()).await;

    Ok(RunReport {
        account_id,
        period,
        message,
        delivery,
    })
}
