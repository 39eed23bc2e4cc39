//! Conversions from Cost Explorer response shapes to our types.

use std::collections::HashMap;

use aws_sdk_costexplorer::types::{Group, MetricValue, ResultByTime};

use crate::providers::traits::{CostAmount, CostProviderError, ServiceCost};

/// Metric requested from Cost Explorer.
pub(crate) const METRIC_UNBLENDED_COST: &str = "UnblendedCost";

/// Dimension key used to group costs per service.
pub(crate) const SERVICE_DIMENSION: &str = "SERVICE";

/// Look up the unblended cost metric in a metric map.
fn unblended<'a>(
    metrics: Option<&'a HashMap<String, MetricValue>>,
    context: &str,
) -> Result<&'a MetricValue, CostProviderError> {
    metrics
        .and_then(|m| m.get(METRIC_UNBLENDED_COST))
        .ok_or_else(|| {
            CostProviderError::MissingData(format!("{context} has no {METRIC_UNBLENDED_COST}"))
        })
}

/// First time bucket; a single-month `MONTHLY` query yields exactly one.
fn first_bucket(results: &[ResultByTime]) -> Result<&ResultByTime, CostProviderError> {
    results
        .first()
        .ok_or_else(|| CostProviderError::MissingData("ResultsByTime is empty".to_string()))
}

/// Extract the total from an ungrouped response.
pub(crate) fn total_from_results(results: &[ResultByTime]) -> Result<CostAmount, CostProviderError> {
    let metric = unblended(first_bucket(results)?.total(), "Total")?;

    let amount = metric
        .amount()
        .ok_or_else(|| CostProviderError::MissingData("Total amount".to_string()))?;
    let unit = metric
        .unit()
        .ok_or_else(|| CostProviderError::MissingData("Total unit".to_string()))?;

    CostAmount::parse(amount, unit)
}

/// Convert one group into a service cost.
fn service_from_group(group: &Group) -> Result<ServiceCost, CostProviderError> {
    let service = group
        .keys()
        .first()
        .ok_or_else(|| CostProviderError::MissingData("Group has no keys".to_string()))?;

    let context = format!("Group {service:?}");
    let amount = unblended(group.metrics(), &context)?
        .amount()
        .ok_or_else(|| CostProviderError::MissingData(format!("{context} amount")))?;

    ServiceCost::parse(service.as_str(), amount)
}

/// Extract per-service costs from one page of a grouped response.
///
/// Groups keep the order the API returned them in.
pub(crate) fn services_from_results(
    results: &[ResultByTime],
) -> Result<Vec<ServiceCost>, CostProviderError> {
    first_bucket(results)?
        .groups()
        .iter()
        .map(service_from_group)
        .collect()
}

/// Token for the next grouped page, if the API returned a non-empty one.
pub(crate) fn next_page_token(token: Option<&str>) -> Option<String> {
    token.filter(|t| !t.is_empty()).map(str::to_string)
}
