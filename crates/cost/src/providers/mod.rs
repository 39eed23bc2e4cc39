//! Cost and identity provider implementations.
//!
//! Only AWS is implemented: Cost Explorer for cost figures and STS for the
//! account identity.

pub mod aws;
mod traits;

pub use aws::{AwsCostExplorer, AwsIdentity};
pub use traits::{
    parse_amount, round_cents, CostAmount, CostProvider, CostProviderError, IdentityProvider,
    ServiceCost,
};
