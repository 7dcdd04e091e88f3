//! # Order Summary
//!
//! Folds the lines of an order into its totals.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Line 1   qty 3   value 300.00   taxable 300.00   tax 54.00   354.00    │
//! │  Line 2   qty 3   value 300.00   taxable 300.00   tax 54.00   354.00    │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  Total    qty 6   value 600.00   taxable 600.00   tax 108.00  708.00    │
//! │                                  CGST 54.00 / SGST 54.00 / IGST 0.00    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The summary is never stored or updated incrementally; callers recompute
//! it from the current lines whenever they need it.

use serde::Serialize;
use ts_rs::TS;

use crate::line::OrderLine;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::tax::TaxBreakdown;

/// Totals of an order. Every field is the sum of the matching line field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub line_count: usize,
    pub total_quantity: Quantity,
    pub total_value: Money,
    pub total_discount: Money,
    pub total_taxable: Money,
    pub tax: TaxBreakdown,
    pub total_tax: Money,
    pub grand_total: Money,
}

/// Aggregates lines into an [`OrderSummary`].
///
/// Sums are order-independent; an empty input gives an all-zero summary.
pub fn aggregate<'a, I>(lines: I) -> OrderSummary
where
    I: IntoIterator<Item = &'a OrderLine>,
{
    lines
        .into_iter()
        .fold(OrderSummary::default(), |summary, line| OrderSummary {
            line_count: summary.line_count + 1,
            total_quantity: summary.total_quantity + line.quantity(),
            total_value: summary.total_value + line.value(),
            total_discount: summary.total_discount + line.discount(),
            total_taxable: summary.total_taxable + line.taxable(),
            tax: summary.tax + line.tax(),
            total_tax: summary.total_tax + line.tax_amount(),
            grand_total: summary.grand_total + line.amount(),
        })
}
