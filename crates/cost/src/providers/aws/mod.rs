//! AWS billing provider.
//!
//! ## Services
//!
//! - **Cost Explorer** - `GetCostAndUsage`, total and grouped by `SERVICE`
//! - **STS** - `GetCallerIdentity`
//!
//! Cost Explorer is a global service served from `us-east-1`; credentials come
//! from the default provider chain (environment, profile, instance or task role).

mod client;
mod models;

pub use client::{load_sdk_config, AwsCostExplorer, AwsIdentity};
