//! Calendar-month billing periods.

use chrono::{Datelike, Months, NaiveDate};

use crate::providers::CostProviderError;

/// Date format used by the Cost Explorer `TimePeriod` fields.
const ISO_DATE: &str = "%Y-%m-%d";

/// Half-open calendar month: `[start, end)`.
///
/// `start` is the first day of a month and `end` is the first day of the
/// following month, which is what Cost Explorer expects for a single
/// `MONTHLY` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BillingPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl BillingPeriod {
    /// Build the period for the month containing `reference`.
    ///
    /// No timezone handling is done here; callers pass a local calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`CostProviderError::InvalidTimeRange`] if the following month
    /// is outside the range `chrono` can represent.
    pub fn containing(reference: NaiveDate) -> Result<Self, CostProviderError> {
        let start = reference.with_day(1).ok_or_else(|| {
            CostProviderError::InvalidTimeRange(format!("no first day for {reference}"))
        })?;
        let end = start.checked_add_months(Months::new(1)).ok_or_else(|| {
            CostProviderError::InvalidTimeRange(format!("no month after {start}"))
        })?;

        Ok(Self { start, end })
    }

    /// First day of the month (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day of the next month (exclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start bound as `YYYY-MM-DD`.
    #[must_use]
    pub fn start_iso(&self) -> String {
        self.start.format(ISO_DATE).to_string()
    }

    /// End bound as `YYYY-MM-DD`.
    #[must_use]
    pub fn end_iso(&self) -> String {
        self.end.format(ISO_DATE).to_string()
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start_iso(), self.end_iso())
    }
}
