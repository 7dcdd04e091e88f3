//! # Quantity
//!
//! Order quantities are decimal (2.5 bags, 0.75 kg) and shown with two
//! fraction digits, so they are stored as an integer count of hundredths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

use crate::parse::parse_scaled;
use crate::MAX_QUANTITY;

/// A non-negative quantity in hundredths of a unit (`300` = 3.00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    #[inline]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Quantity(hundredths)
    }

    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * 100)
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn hundredths(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parses a quantity, returning `None` for unparsable or negative text
    /// and for anything above [`MAX_QUANTITY`].
    pub fn parse(text: &str) -> Option<Quantity> {
        parse_scaled(text, 2)
            .filter(|hundredths| (0..=MAX_QUANTITY.0).contains(hundredths))
            .map(Quantity)
    }

    /// Forgiving parse used by the entry form: anything that is not a
    /// non-negative number counts as zero.
    ///
    /// ```rust
    /// use khata_core::quantity::Quantity;
    ///
    /// assert_eq!(Quantity::parse_or_zero("3"), Quantity::from_units(3));
    /// assert_eq!(Quantity::parse_or_zero(""), Quantity::zero());
    /// assert_eq!(Quantity::parse_or_zero("-2"), Quantity::zero());
    /// ```
    pub fn parse_or_zero(text: &str) -> Quantity {
        Quantity::parse(text).unwrap_or_default()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0.saturating_add(other.0))
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), Add::add)
    }
}
