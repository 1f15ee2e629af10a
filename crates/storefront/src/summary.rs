//! Cart totals for display.

use bistro_core::{LineItem, TaxRate, format_money};
use rust_decimal::Decimal;
use serde::Serialize;

/// Subtotal, tax and total computed from a cart's lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Number of distinct products.
    pub item_count: usize,
    /// Units across all lines.
    pub total_quantity: u64,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Rate the tax was computed at.
    pub tax_rate: TaxRate,
    /// Tax on the subtotal, rounded to cents.
    pub tax: Decimal,
    /// Subtotal plus tax.
    pub total: Decimal,
}

impl CartSummary {
    /// Compute the summary for `items` at `tax_rate`.
    #[must_use]
    pub fn compute(items: &[LineItem], tax_rate: TaxRate) -> Self {
        let subtotal: Decimal = items.iter().map(LineItem::line_total).sum();
        let tax = tax_rate.apply(subtotal);

        Self {
            item_count: items.len(),
            total_quantity: items
                .iter()
                .map(|item| u64::from(item.quantity.get()))
                .sum(),
            subtotal,
            tax_rate,
            tax,
            total: subtotal + tax,
        }
    }

    /// An empty cart's summary.
    #[must_use]
    pub fn empty(tax_rate: TaxRate) -> Self {
        Self::compute(&[], tax_rate)
    }

    /// Formatted subtotal, e.g. `$30.50`.
    #[must_use]
    pub fn subtotal_display(&self) -> String {
        format_money(self.subtotal)
    }

    /// Formatted tax.
    #[must_use]
    pub fn tax_display(&self) -> String {
        format_money(self.tax)
    }

    /// Formatted total.
    #[must_use]
    pub fn total_display(&self) -> String {
        format_money(self.total)
    }
}
