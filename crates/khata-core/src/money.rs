//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Binary floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Summed over a long sales order, the drift leaks into the grand total  │
//! │  even when every line is shown with `toFixed(2)`.                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹354.00 is stored as 35400 paise                                    │
//! │    Every place a fraction of a paisa appears rounds explicitly         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use khata_core::money::Money;
//!
//! let rate = Money::from_paise(10000); // ₹100.00
//! let total = rate + Money::from_paise(550);
//! assert_eq!(total.to_string(), "105.50");
//!
//! // Free text from the entry form
//! assert_eq!(Money::parse("99.5"), Some(Money::from_paise(9950)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::parse::{div_round, parse_scaled};
use crate::quantity::Quantity;
use crate::types::{DiscountRate, TaxRate};
use crate::MAX_AMOUNT;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 of a rupee).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Item.sale_rate ──► OrderLine.rate ──► OrderLine.value (qty × rate)     │
/// │                                              │                          │
/// │                                   discount ──┤                          │
/// │                                              ▼                          │
/// │                                       OrderLine.taxable                 │
/// │                                              │                          │
/// │                         calculate_tax(18%) ──┤                          │
/// │                                              ▼                          │
/// │                              OrderLine.amount ──► OrderSummary totals   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ```rust
    /// use khata_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(100).paise(), 10000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses free text such as `"100"`, `"99.5"` or `" 12.345 "`.
    ///
    /// Returns `None` when the text holds no leading number. Callers decide
    /// what a missing value means (zero, or a catalog fallback).
    pub fn parse(text: &str) -> Option<Money> {
        parse_scaled(text, 2).map(Money)
    }

    /// Parses free text, rejecting negative amounts and amounts above
    /// [`MAX_AMOUNT`].
    ///
    /// Rates and values on an order line are never negative; a stray minus
    /// sign is treated the same as unparsable input.
    pub fn parse_non_negative(text: &str) -> Option<Money> {
        Money::parse(text).filter(Money::is_line_amount)
    }

    /// True for `0..=MAX_AMOUNT`, the range an order line rate or value
    /// may take.
    #[inline]
    pub const fn is_line_amount(&self) -> bool {
        self.0 >= 0 && self.0 <= MAX_AMOUNT.0
    }

    /// Narrows an `i128` intermediate, saturating at the `i64` bounds.
    fn saturating_from(paise: i128) -> Money {
        match i64::try_from(paise) {
            Ok(paise) => Money(paise),
            Err(_) if paise < 0 => Money(i64::MIN),
            Err(_) => Money(i64::MAX),
        }
    }

    /// Calculates tax at `rate`, rounding half away from zero.
    ///
    /// ## Implementation
    /// Integer math: `paise × bps / 10000`, rounded.
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::money::Money;
    /// use khata_core::types::TaxRate;
    ///
    /// let taxable = Money::from_rupees(300);
    /// let tax = taxable.calculate_tax(TaxRate::from_bps(1800)); // 18% GST
    /// assert_eq!(tax.to_string(), "54.00");
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.basis_points(rate.bps())
    }

    /// Returns the discount amount at `rate` (not the discounted amount).
    ///
    /// ```rust
    /// use khata_core::money::Money;
    /// use khata_core::types::DiscountRate;
    ///
    /// let value = Money::from_rupees(250);
    /// let discount = value.discount_amount(DiscountRate::from_bps(1000)); // 10%
    /// assert_eq!(discount, Money::from_rupees(25));
    /// ```
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        self.basis_points(rate.bps())
    }

    fn basis_points(&self, bps: u32) -> Money {
        // i128 keeps large order values from overflowing
        Money::saturating_from(div_round(self.0 as i128 * bps as i128, 10_000))
    }

    /// Multiplies a per-unit rate by a (fractional) quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Item: Cement bag ₹385.50
    /// Quantity: 2.5
    ///      │
    ///      ▼
    /// multiply_quantity(2.5) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Value: ₹963.75
    /// ```
    ///
    /// ```rust
    /// use khata_core::money::Money;
    /// use khata_core::quantity::Quantity;
    ///
    /// let rate = Money::from_paise(38550);
    /// let value = rate.multiply_quantity(Quantity::from_hundredths(250));
    /// assert_eq!(value.paise(), 96375);
    /// ```
    pub fn multiply_quantity(&self, quantity: Quantity) -> Money {
        Money::saturating_from(div_round(
            self.0 as i128 * quantity.hundredths() as i128,
            100,
        ))
    }

    /// Divides an amount by a quantity to get a per-unit rate.
    ///
    /// Returns `None` for a zero quantity: there is no rate to derive,
    /// and the caller keeps whatever rate it had.
    pub fn divide_by_quantity(&self, quantity: Quantity) -> Option<Money> {
        if quantity.is_zero() || quantity.hundredths() < 0 {
            return None;
        }
        let paise = div_round(self.0 as i128 * 100, quantity.hundredths() as i128);
        i64::try_from(paise).ok().map(Money)
    }

    /// Splits an amount into two halves that always sum back to `self`.
    ///
    /// The odd paisa (if any) goes to the first half.
    ///
    /// ```rust
    /// use khata_core::money::Money;
    ///
    /// let (a, b) = Money::from_paise(5401).split_half();
    /// assert_eq!((a.paise(), b.paise()), (2701, 2700));
    /// ```
    pub fn split_half(&self) -> (Money, Money) {
        let second = Money(self.0 / 2);
        (*self - second, second)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates at the i64 bounds rather than wrapping or panicking.

/// Renders exactly two fraction digits without a currency symbol.
///
/// The symbol is a display concern of the application layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Decimal-String Serde
// =============================================================================

/// Serde adapter for the backend's decimal representation of money.
///
/// The backend sends rates as JSON numbers (`"SalRate": 100.5`) and expects
/// amounts back as two-decimal strings (`"Amount": "354.00"`). This module
/// reads either form and always writes the string form.
///
/// Incoming amounts must lie in `0..=MAX_AMOUNT`; anything else is a
/// deserialization error.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::decimal")]
/// pub sale_rate: Money,
/// ```
pub mod decimal {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    use super::Money;

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(money)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let money = deserializer.deserialize_any(DecimalVisitor)?;
        if money.is_line_amount() {
            Ok(money)
        } else {
            Err(de::Error::custom(format!("amount out of range: {}", money)))
        }
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal amount as a number or string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            v.checked_mul(100)
                .map(Money::from_paise)
                .ok_or_else(|| E::custom("amount out of range"))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            i64::try_from(v)
                .map_err(|_| E::custom("amount out of range"))
                .and_then(|v| self.visit_i64(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            // Shortest round-trip text of the float, then exact decimal parse
            self.visit_str(&v.to_string())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
            Money::parse(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(35400).to_string(), "354.00");
        assert_eq!(Money::from_paise(500).to_string(), "5.00");
        assert_eq!(Money::from_paise(7).to_string(), "0.07");
        assert_eq!(Money::from_paise(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((-a).paise(), -1000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.paise(), 2000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("100"), Some(Money::from_rupees(100)));
        assert_eq!(Money::parse("0.1"), Some(Money::from_paise(10)));
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse_non_negative("-5"), None);
        assert_eq!(Money::parse_non_negative("5"), Some(Money::from_rupees(5)));
    }

    #[test]
    fn test_parse_non_negative_upper_bound() {
        assert_eq!(Money::parse_non_negative("100000000"), Some(MAX_AMOUNT));
        assert_eq!(Money::parse_non_negative("100000000.01"), None);
        assert_eq!(Money::parse_non_negative("90000000000000000"), None);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_paise(i64::MAX);
        assert_eq!(max + Money::from_paise(1), max);
        assert_eq!(Money::from_paise(i64::MIN) - Money::from_paise(1), Money::from_paise(i64::MIN));

        let mut total = max;
        total += max;
        assert_eq!(total, max);

        let huge = max.multiply_quantity(Quantity::from_units(1_000));
        assert_eq!(huge, max);
        assert_eq!(-Money::from_paise(i64::MIN), max);
    }

    #[test]
    fn test_tax_calculation_gst() {
        let taxable = Money::from_rupees(300);
        let tax = taxable.calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.paise(), 5400);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // ₹0.25 at 18% = 4.5 paise → 5 paise
        let tax = Money::from_paise(25).calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.paise(), 5);

        // ₹0.22 at 18% = 3.96 paise → 4 paise
        let tax = Money::from_paise(22).calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.paise(), 4);
    }

    #[test]
    fn test_discount_amount() {
        let value = Money::from_rupees(100);
        assert_eq!(value.discount_amount(DiscountRate::from_bps(1000)).paise(), 1000);
        assert_eq!(value.discount_amount(DiscountRate::zero()).paise(), 0);
    }

    #[test]
    fn test_multiply_quantity() {
        let rate = Money::from_rupees(100);
        assert_eq!(rate.multiply_quantity(Quantity::from_units(3)).paise(), 30000);
        assert_eq!(rate.multiply_quantity(Quantity::zero()).paise(), 0);

        // ₹0.33 × 0.5 = 16.5 paise → 17 paise
        let value = Money::from_paise(33).multiply_quantity(Quantity::from_hundredths(50));
        assert_eq!(value.paise(), 17);
    }

    #[test]
    fn test_divide_by_quantity() {
        let value = Money::from_rupees(300);
        assert_eq!(
            value.divide_by_quantity(Quantity::from_units(3)),
            Some(Money::from_rupees(100))
        );
        assert_eq!(value.divide_by_quantity(Quantity::zero()), None);

        // ₹10.00 / 3 = 333.33 paise → 333 paise
        let rate = Money::from_rupees(10).divide_by_quantity(Quantity::from_units(3));
        assert_eq!(rate, Some(Money::from_paise(333)));
    }

    #[test]
    fn test_split_half_preserves_total() {
        for paise in [0, 1, 5400, 5401, 12345] {
            let amount = Money::from_paise(paise);
            let (first, second) = amount.split_half();
            assert_eq!(first + second, amount);
            assert!((first - second).paise() <= 1);
        }
    }

    #[test]
    fn test_decimal_serde() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "decimal")]
            amount: Money,
        }

        let w: Wrapper = serde_json::from_str(r#"{"amount": 100.5}"#).unwrap();
        assert_eq!(w.amount.paise(), 10050);

        let w: Wrapper = serde_json::from_str(r#"{"amount": 100}"#).unwrap();
        assert_eq!(w.amount.paise(), 10000);

        let w: Wrapper = serde_json::from_str(r#"{"amount": "12.34"}"#).unwrap();
        assert_eq!(w.amount.paise(), 1234);

        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"amount":"12.34"}"#);
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": "n/a"}"#).is_err());
    }

    #[test]
    fn test_decimal_serde_rejects_out_of_range() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            #[serde(with = "decimal")]
            #[allow(dead_code)]
            amount: Money,
        }

        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": -5}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": "-0.50"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": 100000001}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": 0}"#).is_ok());
    }
}
