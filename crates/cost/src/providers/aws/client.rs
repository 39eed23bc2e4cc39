//! AWS Cost Explorer and STS clients.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_costexplorer::config::Region;
use aws_sdk_costexplorer::types::{
    DateInterval, Granularity, GroupDefinition, GroupDefinitionType,
};
use tracing::{debug, instrument};

use super::models::{
    next_page_token, services_from_results, total_from_results,
    METRIC_UNBLENDED_COST, SERVICE_DIMENSION,
};
use crate::period::BillingPeriod;
use crate::providers::traits::{
    CostAmount, CostProvider, CostProviderError, IdentityProvider, ServiceCost,
};

/// Load the shared SDK configuration for `region`.
///
/// Credentials are resolved by the default provider chain; nothing is read
/// from our own configuration.
pub async fn load_sdk_config(region: impl Into<String>) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.into()))
        .load()
        .await
}

/// Cost Explorer backed [`CostProvider`].
#[derive(Debug, Clone)]
pub struct AwsCostExplorer {
    client: aws_sdk_costexplorer::Client,
}

impl AwsCostExplorer {
    /// Wrap an existing Cost Explorer client.
    #[must_use]
    pub fn new(client: aws_sdk_costexplorer::Client) -> Self {
        Self { client }
    }

    /// Build a client from shared SDK configuration.
    #[must_use]
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(aws_sdk_costexplorer::Client::new(config))
    }

    /// Convert a billing period into the request's time window.
    fn time_period(period: &BillingPeriod) -> Result<DateInterval, CostProviderError> {
        DateInterval::builder()
            .start(period.start_iso())
            .end(period.end_iso())
            .build()
            .map_err(|e| CostProviderError::InvalidRequest(e.to_string()))
    }
}

#[async_trait]
impl CostProvider for AwsCostExplorer {
    fn name(&self) -> &'static str {
        "aws"
    }

    #[instrument(skip(self), fields(provider = "aws"))]
    async fn total_cost(&self, period: &BillingPeriod) -> Result<CostAmount, CostProviderError> {
        let response = self
            .client
            .get_cost_and_usage()
            .time_period(Self::time_period(period)?)
            .granularity(Granularity::Monthly)
            .metrics(METRIC_UNBLENDED_COST)
            .send()
            .await
            .map_err(aws_sdk_costexplorer::Error::from)?;

        let total = total_from_results(response.results_by_time())?;
        debug!(amount = %total.amount, unit = %total.unit, "Fetched total cost");
        Ok(total)
    }

    #[instrument(skip(self), fields(provider = "aws"))]
    async fn service_costs(
        &self,
        period: &BillingPeriod,
    ) -> Result<Vec<ServiceCost>, CostProviderError> {
        let time_period = Self::time_period(period)?;
        let group_by = GroupDefinition::builder()
            .r#type(GroupDefinitionType::Dimension)
            .key(SERVICE_DIMENSION)
            .build();

        let mut services = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .client
                .get_cost_and_usage()
                .time_period(time_period.clone())
                .granularity(Granularity::Monthly)
                .metrics(METRIC_UNBLENDED_COST)
                .group_by(group_by.clone())
                .set_next_page_token(page_token.take())
                .send()
                .await
                .map_err(aws_sdk_costexplorer::Error::from)?;

            let page = services_from_results(response.results_by_time())?;
            debug!(groups = page.len(), "Fetched service cost page");
            services.extend(page);

            page_token = next_page_token(response.next_page_token());
            if page_token.is_none() {
                break;
            }
        }

        Ok(services)
    }
}

/// STS backed [`IdentityProvider`].
#[derive(Debug, Clone)]
pub struct AwsIdentity {
    client: aws_sdk_sts::Client,
}

impl AwsIdentity {
    /// Wrap an existing STS client.
    #[must_use]
    pub fn new(client: aws_sdk_sts::Client) -> Self {
        Self { client }
    }

    /// Build a client from shared SDK configuration.
    #[must_use]
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(aws_sdk_sts::Client::new(config))
    }
}

#[async_trait]
impl IdentityProvider for AwsIdentity {
    #[instrument(skip(self), fields(provider = "aws"))]
    async fn account_id(&self) -> Result<String, CostProviderError> {
        let response = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(aws_sdk_sts::Error::from)?;

        response
            .account()
            .map(str::to_string)
            .ok_or_else(|| CostProviderError::MissingData("caller identity account".to_string()))
    }
}
