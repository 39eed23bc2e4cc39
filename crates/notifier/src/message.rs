//! Billing summary text.

use billing_cost::{CostAmount, ServiceCost};

/// Multi-line summary posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingMessage {
    lines: Vec<String>,
}

impl BillingMessage {
    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Newline-joined text, as sent.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl std::fmt::Display for BillingMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

/// Build the summary: title, account id, then one line per service.
///
/// Amounts are rounded half-to-even to cents and always shown with two
/// decimals. A service is left out when its *rounded* amount is zero, so
/// `0.005` is dropped while `0.0051` is kept. Service order is kept as given.
/// Service lines use the total's unit.
#[must_use]
pub fn format_message(
    account_id: &str,
    total: &CostAmount,
    services: &[ServiceCost],
) -> BillingMessage {
    let unit = &total.unit;

    let mut lines = vec![
        format!("this month's total billing is {:.2} {unit}", total.rounded()),
        format!("account id: {account_id}"),
    ];

    lines.extend(services.iter().filter_map(|entry| {
        let amount = entry.rounded();
        (!amount.is_zero()).then(|| format!("  - {}: {amount:.2} {unit}", entry.service))
    }));

    BillingMessage { lines }
}
