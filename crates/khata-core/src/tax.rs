//! # GST Policy
//!
//! Which rate applies to a line and how the resulting tax is divided
//! between the GST components.
//!
//! ## Split Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TaxSplit          CGST        SGST        UTGST       IGST             │
//! │  ──────────────    ─────────   ─────────   ─────────   ─────────        │
//! │  IntraState        tax / 2     tax / 2     0           0      (default) │
//! │  InterState        0           0           0           tax              │
//! │  UnionTerritory    tax / 2     0           tax / 2     0                │
//! │                                                                         │
//! │  Halves are exact to the paisa: the odd paisa goes to CGST, so the     │
//! │  components always add back to the line's tax amount.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The defaults (18%, intra-state, fixed rate for every item) are the
//! values the downstream billing system expects; anything else must be
//! chosen explicitly.

use serde::{Deserialize, Serialize};
use std::ops::Add;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Item, TaxRate};

/// Default GST rate applied to every line: 18%.
pub const DEFAULT_GST_RATE: TaxRate = TaxRate::from_bps(1800);

/// How a line's tax is divided between GST components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxSplit {
    /// Same-state sale: CGST + SGST in equal halves.
    #[default]
    IntraState,
    /// Cross-state sale: all IGST.
    InterState,
    /// Union territory without a legislature: CGST + UTGST in equal halves.
    UnionTerritory,
}

/// Where a line's GST rate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Always the policy rate, ignoring the item's classification.
    #[default]
    Fixed,
    /// The item's own GST rate when the catalog has one, else the policy rate.
    PerItem,
}

/// Tax policy used to price order lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxPolicy {
    pub rate: TaxRate,
    pub split: TaxSplit,
    pub rate_source: RateSource,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy {
            rate: DEFAULT_GST_RATE,
            split: TaxSplit::IntraState,
            rate_source: RateSource::Fixed,
        }
    }
}

impl TaxPolicy {
    /// Returns the GST rate for a line of `item`.
    pub fn rate_for(&self, item: &Item) -> TaxRate {
        match self.rate_source {
            RateSource::Fixed => self.rate,
            RateSource::PerItem => item.gst_rate.unwrap_or(self.rate),
        }
    }

    /// Divides a line's tax amount into GST components.
    pub fn split_tax(&self, tax: Money) -> TaxBreakdown {
        match self.split {
            TaxSplit::IntraState => {
                let (cgst, sgst) = tax.split_half();
                TaxBreakdown {
                    cgst,
                    sgst,
                    ..TaxBreakdown::default()
                }
            }
            TaxSplit::InterState => TaxBreakdown {
                igst: tax,
                ..TaxBreakdown::default()
            },
            TaxSplit::UnionTerritory => {
                let (cgst, utgst) = tax.split_half();
                TaxBreakdown {
                    cgst,
                    utgst,
                    ..TaxBreakdown::default()
                }
            }
        }
    }
}

/// Tax amount of one line (or a whole order) by GST component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxBreakdown {
    pub cgst: Money,
    pub sgst: Money,
    pub utgst: Money,
    pub igst: Money,
}

impl TaxBreakdown {
    /// Sum of all components.
    pub fn total(&self) -> Money {
        self.cgst + self.sgst + self.utgst + self.igst
    }
}

impl Add for TaxBreakdown {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        TaxBreakdown {
            cgst: self.cgst + other.cgst,
            sgst: self.sgst + other.sgst,
            utgst: self.utgst + other.utgst,
            igst: self.igst + other.igst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_rate(gst_rate: Option<TaxRate>) -> Item {
        Item {
            id: 1,
            code: "ITEM-1".to_string(),
            name: "Item 1".to_string(),
            sale_rate: Money::from_rupees(100),
            hsn_code: None,
            tax_code: None,
            cgst_code: None,
            sgst_code: None,
            igst_code: None,
            utgst_code: None,
            gst_rate,
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = TaxPolicy::default();
        assert_eq!(policy.rate.bps(), 1800);
        assert_eq!(policy.split, TaxSplit::IntraState);
        assert_eq!(policy.rate_source, RateSource::Fixed);
    }

    #[test]
    fn test_fixed_rate_ignores_item_rate() {
        let policy = TaxPolicy::default();
        let item = item_with_rate(Some(TaxRate::from_bps(500)));
        assert_eq!(policy.rate_for(&item), DEFAULT_GST_RATE);
    }

    #[test]
    fn test_per_item_rate_with_fallback() {
        let policy = TaxPolicy {
            rate_source: RateSource::PerItem,
            ..TaxPolicy::default()
        };
        assert_eq!(
            policy.rate_for(&item_with_rate(Some(TaxRate::from_bps(500)))),
            TaxRate::from_bps(500)
        );
        assert_eq!(policy.rate_for(&item_with_rate(None)), DEFAULT_GST_RATE);
    }

    #[test]
    fn test_intra_state_split() {
        let breakdown = TaxPolicy::default().split_tax(Money::from_rupees(54));
        assert_eq!(breakdown.cgst, Money::from_rupees(27));
        assert_eq!(breakdown.sgst, Money::from_rupees(27));
        assert!(breakdown.igst.is_zero());
        assert!(breakdown.utgst.is_zero());
    }

    #[test]
    fn test_intra_state_split_odd_paisa() {
        let breakdown = TaxPolicy::default().split_tax(Money::from_paise(101));
        assert_eq!(breakdown.cgst.paise(), 51);
        assert_eq!(breakdown.sgst.paise(), 50);
        assert_eq!(breakdown.total().paise(), 101);
    }

    #[test]
    fn test_inter_state_split() {
        let policy = TaxPolicy {
            split: TaxSplit::InterState,
            ..TaxPolicy::default()
        };
        let breakdown = policy.split_tax(Money::from_rupees(54));
        assert_eq!(breakdown.igst, Money::from_rupees(54));
        assert!(breakdown.cgst.is_zero());
        assert!(breakdown.sgst.is_zero());
    }

    #[test]
    fn test_union_territory_split() {
        let policy = TaxPolicy {
            split: TaxSplit::UnionTerritory,
            ..TaxPolicy::default()
        };
        let breakdown = policy.split_tax(Money::from_rupees(54));
        assert_eq!(breakdown.cgst, Money::from_rupees(27));
        assert_eq!(breakdown.utgst, Money::from_rupees(27));
        assert!(breakdown.sgst.is_zero());
    }
}
