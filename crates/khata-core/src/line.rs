//! # Order Line Pricing
//!
//! Turns a selected item plus the text typed into the entry form into a
//! fully priced [`OrderLine`].
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  quantity text ──► Quantity (bad text → 0)                              │
//! │  rate text ──────► Money    (bad text → item.sale_rate)                 │
//! │                         │                                               │
//! │                         ▼                                               │
//! │  value    = quantity × rate        (or typed directly, see LineDraft)   │
//! │  discount = value × discount% / 100                                     │
//! │  taxable  = value − discount                                            │
//! │  tax      = taxable × GST rate     (TaxPolicy, 18% by default)          │
//! │  amount   = taxable + tax                                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here fails. The form recomputes on every keystroke, so
//! half-typed numbers are coerced instead of reported.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::quantity::Quantity;
use crate::tax::{TaxBreakdown, TaxPolicy};
use crate::types::{DiscountRate, Item, ItemRef, TaxRate};

// =============================================================================
// Rate / Value Recalculation
// =============================================================================

/// Value of a line after the user edits its rate.
///
/// ```rust
/// use khata_core::line::recompute_from_rate_edit;
/// use khata_core::{Money, Quantity};
///
/// let value = recompute_from_rate_edit(Quantity::from_units(4), Money::from_paise(1250));
/// assert_eq!(value.to_string(), "50.00");
/// ```
pub fn recompute_from_rate_edit(quantity: Quantity, new_rate: Money) -> Money {
    new_rate.multiply_quantity(quantity)
}

/// Rate of a line after the user edits its value.
///
/// Returns `None` when the quantity is zero; the caller keeps the rate it
/// already had instead of dividing by zero.
///
/// ```rust
/// use khata_core::line::recompute_from_value_edit;
/// use khata_core::{Money, Quantity};
///
/// let rate = recompute_from_value_edit(Quantity::from_units(4), Money::from_rupees(50));
/// assert_eq!(rate, Some(Money::from_paise(1250)));
/// assert_eq!(recompute_from_value_edit(Quantity::zero(), Money::from_rupees(50)), None);
/// ```
pub fn recompute_from_value_edit(quantity: Quantity, new_value: Money) -> Option<Money> {
    new_value.divide_by_quantity(quantity)
}

// =============================================================================
// Order Line
// =============================================================================

/// Which of rate/value the user typed last. The other one is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceDriver {
    #[default]
    Rate,
    Value,
}

/// A priced line of a sales order.
///
/// ## Invariants
/// - `taxable == value - discount`
/// - `tax_amount == taxable × tax_rate` and `tax.total() == tax_amount`
/// - `amount == taxable + tax_amount`
/// - zero quantity implies zero value
///
/// Lines are only built by [`OrderLineCalculator`] and are not edited after
/// they join an order; to change one, remove it and add it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    item: ItemRef,
    quantity: Quantity,
    rate: Money,
    value: Money,
    driver: PriceDriver,
    discount_rate: DiscountRate,
    discount: Money,
    taxable: Money,
    tax_rate: TaxRate,
    tax: TaxBreakdown,
    tax_amount: Money,
    amount: Money,
}

impl OrderLine {
    pub fn item(&self) -> &ItemRef {
        &self.item
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn rate(&self) -> Money {
        self.rate
    }

    /// Quantity × rate, or the typed value when value drove the edit.
    pub fn value(&self) -> Money {
        self.value
    }

    pub fn driver(&self) -> PriceDriver {
        self.driver
    }

    pub fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn taxable(&self) -> Money {
        self.taxable
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn tax(&self) -> TaxBreakdown {
        self.tax
    }

    pub fn tax_amount(&self) -> Money {
        self.tax_amount
    }

    /// Line total: taxable + tax.
    pub fn amount(&self) -> Money {
        self.amount
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Prices order lines under a fixed [`TaxPolicy`].
///
/// ## Example
/// ```rust
/// use khata_core::line::OrderLineCalculator;
/// use khata_core::{Item, Money};
///
/// let item = Item {
///     id: 1,
///     code: "CEM-50".into(),
///     name: "Cement 50kg".into(),
///     sale_rate: Money::from_rupees(100),
///     hsn_code: Some("2523".into()),
///     tax_code: None,
///     cgst_code: None,
///     sgst_code: None,
///     igst_code: None,
///     utgst_code: None,
///     gst_rate: None,
/// };
///
/// let line = OrderLineCalculator::default().derive_line(&item, "3", "");
/// assert_eq!(line.value().to_string(), "300.00");
/// assert_eq!(line.tax_amount().to_string(), "54.00");
/// assert_eq!(line.amount().to_string(), "354.00");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderLineCalculator {
    policy: TaxPolicy,
}

impl OrderLineCalculator {
    pub fn new(policy: TaxPolicy) -> Self {
        OrderLineCalculator { policy }
    }

    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }

    /// Prices a line from raw form text with no discount.
    ///
    /// ## Parsing Rules
    /// - quantity: empty, unparsable or negative text counts as `0`
    /// - rate: empty, unparsable or negative text falls back to the
    ///   item's catalog sale rate
    pub fn derive_line(&self, item: &Item, quantity: &str, rate: &str) -> OrderLine {
        self.derive_line_with_discount(item, quantity, rate, DiscountRate::zero())
    }

    /// Same as [`derive_line`](Self::derive_line) with a line discount.
    pub fn derive_line_with_discount(
        &self,
        item: &Item,
        quantity: &str,
        rate: &str,
        discount_rate: DiscountRate,
    ) -> OrderLine {
        let quantity = Quantity::parse_or_zero(quantity);
        let rate = Money::parse_non_negative(rate).unwrap_or(item.sale_rate);
        let value = recompute_from_rate_edit(quantity, rate);
        self.price(item, quantity, rate, value, PriceDriver::Rate, discount_rate)
    }

    /// Prices the current state of an entry-form draft.
    pub fn price_draft(&self, draft: &LineDraft) -> OrderLine {
        self.price(
            &draft.item,
            draft.quantity,
            draft.rate,
            draft.value(),
            draft.driver,
            draft.discount_rate,
        )
    }

    fn price(
        &self,
        item: &Item,
        quantity: Quantity,
        rate: Money,
        value: Money,
        driver: PriceDriver,
        discount_rate: DiscountRate,
    ) -> OrderLine {
        let discount = value.discount_amount(discount_rate);
        let taxable = value - discount;
        let tax_rate = self.policy.rate_for(item);
        let tax_amount = taxable.calculate_tax(tax_rate);

        OrderLine {
            item: item.to_ref(),
            quantity,
            rate,
            value,
            driver,
            discount_rate,
            discount,
            taxable,
            tax_rate,
            tax: self.policy.split_tax(tax_amount),
            tax_amount,
            amount: taxable + tax_amount,
        }
    }
}

/// Prices a line under the default policy (18% GST, CGST/SGST halves).
pub fn derive_line(item: &Item, quantity: &str, rate: &str) -> OrderLine {
    OrderLineCalculator::default().derive_line(item, quantity, rate)
}

// =============================================================================
// Line Draft
// =============================================================================

/// The line currently being edited on the entry form.
///
/// ## Edit Flow
/// ```text
/// select item ──► LineDraft::new   qty 1, rate = catalog rate
///                      │
///   edit_quantity ─────┤  driver unchanged, derived side follows
///   edit_rate ─────────┤  driver = Rate:  value = qty × rate
///   edit_value ────────┤  driver = Value: rate  = value / qty
///   edit_discount ─────┤
///                      ▼
///        OrderLineCalculator::price_draft ──► OrderLine
/// ```
///
/// ## Zero Quantity
/// A zero quantity always prices to a zero value. A value typed while the
/// quantity is zero leaves the rate untouched; the typed value is kept and
/// drives the rate again as soon as a quantity is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDraft {
    item: Item,
    quantity: Quantity,
    rate: Money,
    value: Money,
    driver: PriceDriver,
    discount_rate: DiscountRate,
}

impl LineDraft {
    /// Starts a draft for `item` with quantity 1 at the catalog rate.
    pub fn new(item: Item) -> Self {
        let quantity = Quantity::from_units(1);
        let rate = item.sale_rate;
        LineDraft {
            value: recompute_from_rate_edit(quantity, rate),
            item,
            quantity,
            rate,
            driver: PriceDriver::Rate,
            discount_rate: DiscountRate::zero(),
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn rate(&self) -> Money {
        self.rate
    }

    /// Effective value: zero whenever the quantity is zero.
    pub fn value(&self) -> Money {
        if self.quantity.is_zero() {
            Money::zero()
        } else {
            self.value
        }
    }

    pub fn driver(&self) -> PriceDriver {
        self.driver
    }

    pub fn edit_quantity(&mut self, text: &str) {
        self.quantity = Quantity::parse_or_zero(text);
        self.rebalance();
    }

    /// Rate edits fall back to the catalog rate for unparsable text.
    pub fn edit_rate(&mut self, text: &str) {
        self.rate = Money::parse_non_negative(text).unwrap_or(self.item.sale_rate);
        self.driver = PriceDriver::Rate;
        self.rebalance();
    }

    /// Value edits treat unparsable text as zero.
    pub fn edit_value(&mut self, text: &str) {
        self.value = Money::parse_non_negative(text).unwrap_or_default();
        self.driver = PriceDriver::Value;
        self.rebalance();
    }

    pub fn edit_discount(&mut self, text: &str) {
        self.discount_rate = DiscountRate::parse_or_zero(text);
    }

    fn rebalance(&mut self) {
        match self.driver {
            PriceDriver::Rate => {
                self.value = recompute_from_rate_edit(self.quantity, self.rate);
            }
            PriceDriver::Value => {
                if let Some(rate) = recompute_from_value_edit(self.quantity, self.value) {
                    self.rate = rate;
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
