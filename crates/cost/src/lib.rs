//! Monthly cost queries for the billing notifier.
//!
//! This crate answers two questions about the account the ambient AWS
//! credentials belong to:
//!
//! - **Who am I?** - [`IdentityProvider`], backed by STS `GetCallerIdentity`
//! - **What has this month cost?** - [`CostProvider`], backed by Cost Explorer
//!   `GetCostAndUsage` with `MONTHLY` granularity and the `UnblendedCost` metric
//!
//! Amounts are exact decimals ([`rust_decimal::Decimal`]); rounding for display
//! is half-to-even via [`round_cents`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use billing_cost::{AwsCostExplorer, AwsIdentity, BillingPeriod, CostProvider, IdentityProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let sdk_config = billing_cost::providers::aws::load_sdk_config("us-east-1").await;
//!     let identity = AwsIdentity::from_conf(&sdk_config);
//!     let costs = AwsCostExplorer::from_conf(&sdk_config);
//!
//!     let period = BillingPeriod::containing(chrono::Local::now().date_naive())?;
//!     let total = costs.total_cost(&period).await?;
//!
//!     println!("{}: {} {}", identity.account_id().await?, total.rounded(), total.unit);
//!     Ok(())
//! }
//! ```

pub mod period;
pub mod providers;

pub use period::BillingPeriod;
pub use providers::{
    round_cents, AwsCostExplorer, AwsIdentity, CostAmount, CostProvider, CostProviderError,
    IdentityProvider, ServiceCost,
};
