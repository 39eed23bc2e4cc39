//! Cost provider traits and common types.

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::period::BillingPeriod;

/// Errors that can occur during cost and identity queries.
///
/// Every variant is fatal for an invocation; nothing here is retried.
#[derive(Error, Debug)]
pub enum CostProviderError {
    /// Cost Explorer call failed (transport, throttling, authorization).
    #[error("Cost Explorer request failed: {0}")]
    CostExplorer(#[from] aws_sdk_costexplorer::Error),

    /// STS call failed.
    #[error("STS request failed: {0}")]
    Sts(#[from] aws_sdk_sts::Error),

    /// Request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response was missing a field we need.
    #[error("Missing data in response: {0}")]
    MissingData(String),

    /// Amount string could not be parsed as a decimal.
    #[error("Invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Invalid time range.
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),
}

// ============================================================================
// Cost types
// ============================================================================

/// Monetary amount with its currency unit, as reported by the billing API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostAmount {
    /// Exact decimal value.
    pub amount: Decimal,
    /// Currency unit (e.g. "USD").
    pub unit: String,
}

impl CostAmount {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: Decimal, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }

    /// Parse an amount from the API's string representation.
    ///
    /// # Errors
    ///
    /// Returns [`CostProviderError::InvalidAmount`] if `amount` is not a decimal.
    pub fn parse(amount: &str, unit: impl Into<String>) -> Result<Self, CostProviderError> {
        Ok(Self::new(parse_amount(amount)?, unit))
    }

    /// Amount rounded to cents, see [`round_cents`].
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        round_cents(self.amount)
    }
}

/// Unblended cost of a single service for the period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCost {
    /// Service name as reported by the `SERVICE` dimension.
    pub service: String,
    /// Cost in the account's billing currency.
    pub amount: Decimal,
}

impl ServiceCost {
    /// Create a new service cost entry.
    #[must_use]
    pub fn new(service: impl Into<String>, amount: Decimal) -> Self {
        Self {
            service: service.into(),
            amount,
        }
    }

    /// Parse a service cost from the API's string amount.
    ///
    /// # Errors
    ///
    /// Returns [`CostProviderError::InvalidAmount`] if `amount` is not a decimal.
    pub fn parse(service: impl Into<String>, amount: &str) -> Result<Self, CostProviderError> {
        Ok(Self::new(service, parse_amount(amount)?))
    }

    /// Amount rounded to cents, see [`round_cents`].
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        round_cents(self.amount)
    }
}

/// Parse a decimal amount string.
///
/// Cost Explorer normally sends plain decimals (`"10.0049"`) but tiny charges
/// can come back in scientific notation (`"1.2E-7"`). Values smaller than
/// `Decimal` can hold round to its 28 places, the same as plain notation.
///
/// # Errors
///
/// Returns [`CostProviderError::InvalidAmount`] if neither form parses.
pub fn parse_amount(raw: &str) -> Result<Decimal, CostProviderError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .or_else(|e| tiny_scientific(trimmed).ok_or(e))
        .map_err(|e| CostProviderError::InvalidAmount {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Scale a negative-exponent scientific amount down one digit at a time.
///
/// `Decimal::from_scientific` rejects scales above 28; dividing instead rounds
/// the digits that do not fit.
fn tiny_scientific(raw: &str) -> Option<Decimal> {
    let (mantissa, exponent) = raw.split_once(|c: char| c == 'e' || c == 'E')?;
    let mut value = Decimal::from_str(mantissa).ok()?;
    let exponent: i64 = exponent.parse().ok()?;
    if exponent >= 0 {
        return None;
    }

    for _ in 0..exponent.unsigned_abs() {
        if value.is_zero() {
            break;
        }
        // Dividing by ten cannot overflow; a failure is an underflow to zero.
        value = value.checked_div(Decimal::TEN).unwrap_or(Decimal::ZERO);
    }
    Some(value)
}

/// Round to two decimal places, half to even.
///
/// A result of zero is normalized so negative credits that round away do not
/// render as `-0.00`.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

// ============================================================================
// Provider traits
// ============================================================================

/// Source of monthly cost figures.
#[async_trait]
pub trait CostProvider: Send + Sync {
    /// Get the provider name (e.g., "aws").
    fn name(&self) -> &'static str;

    /// Total unblended cost for the period, ungrouped.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response has no total.
    async fn total_cost(&self, period: &BillingPeriod) -> Result<CostAmount, CostProviderError>;

    /// Unblended cost per service for the period, in API order.
    ///
    /// # Errors
    ///
    /// Returns an error if any API request fails or a group is malformed.
    async fn service_costs(
        &self,
        period: &BillingPeriod,
    ) -> Result<Vec<ServiceCost>, CostProviderError>;
}

/// Resolves the account the ambient credentials belong to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Account identifier of the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no account is returned.
    async fn account_id(&self) -> Result<String, CostProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain_amount() {
        let amount = CostAmount::parse("123.456", "USD").unwrap();
        assert_eq!(amount.amount, dec("123.456"));
        assert_eq!(amount.unit, "USD");
        assert_eq!(amount.rounded(), dec("123.46"));
    }

    #[test]
    fn test_parse_scientific_amount() {
        let amount = parse_amount("1.2E-7").unwrap();
        assert_eq!(amount, dec("0.00000012"));
        assert_eq!(round_cents(amount), Decimal::ZERO);
    }

    #[test]
    fn test_parse_scientific_below_decimal_precision() {
        assert_eq!(parse_amount("5E-30").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("1.2E-29").unwrap(), Decimal::ZERO);
        assert!(round_cents(parse_amount("-7.5e-40").unwrap()).is_zero());
        // Same size in plain notation parses the same way.
        assert_eq!(
            parse_amount("1.2E-29").unwrap(),
            parse_amount("0.000000000000000000000000000012").unwrap()
        );
    }

    #[test]
    fn test_parse_scientific_at_decimal_precision() {
        assert_eq!(
            parse_amount("1.2E-28").unwrap(),
            dec("0.0000000000000000000000000001")
        );
    }

    #[test]
    fn test_parse_rejects_oversized_scientific() {
        let err = parse_amount("1E400").unwrap_err();
        assert!(matches!(err, CostProviderError::InvalidAmount { .. }));
    }

    #[test]
    fn test_service_cost_below_precision_rounds_away() {
        let cost = ServiceCost::parse("AWS Key Management Service", "3.1E-31").unwrap();
        assert!(cost.rounded().is_zero());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_amount(" 4.20 ").unwrap(), dec("4.20"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_amount("twelve").unwrap_err();
        assert!(matches!(err, CostProviderError::InvalidAmount { ref value, .. } if value == "twelve"));
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round_cents(dec("10.005")), dec("10.00"));
        assert_eq!(round_cents(dec("10.015")), dec("10.02"));
        assert_eq!(round_cents(dec("0.005")), Decimal::ZERO);
        assert_eq!(round_cents(dec("0.0051")), dec("0.01"));
    }

    #[test]
    fn test_negative_credit_rounding_to_zero_is_normalized() {
        let rounded = round_cents(dec("-0.001"));
        assert!(rounded.is_zero());
        assert!(!rounded.is_sign_negative());
    }

    #[test]
    fn test_service_cost_parse() {
        let cost = ServiceCost::parse("Amazon S3", "10.005").unwrap();
        assert_eq!(cost.service, "Amazon S3");
        assert_eq!(cost.rounded(), dec("10.00"));
    }
}
