//! # Domain Types
//!
//! Reference data and rates used throughout Khata.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    Customer     │   │ CompanySession  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  ItemID         │   │  CustomerID     │   │  user_id        │       │
//! │  │  ItemCode       │   │  CustomerName   │   │  company_id     │       │
//! │  │  SalRate        │   │  GSTNo          │   │  fiscal_year    │       │
//! │  │  HSNCode/TaxCode│   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │  DiscountRate   │                             │
//! │  │  bps (u32)      │   │  bps (u32)      │                             │
//! │  │  1800 = 18%     │   │  0..=10000      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items and customers are owned by the billing backend. They arrive with
//! the backend's PascalCase field names and are read-only here.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::parse::parse_scaled;

/// Writes a basis-point value as a two-decimal percentage (`1800` → `18.00`).
fn fmt_bps(bps: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:02}", bps / 100, bps % 100)
}

// =============================================================================
// Tax Rate
// =============================================================================

/// GST rate in basis points (1 bps = 0.01%).
///
/// ## Why Basis Points?
/// GST slabs (0.25%, 3%, 5%, 12%, 18%, 28%) are all exact in bps, so the
/// rate never has to be a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Parses a percentage such as `"18"` or `"0.25"`.
    ///
    /// Returns `None` for unparsable, negative, or over-100% input.
    pub fn parse_percent(text: &str) -> Option<TaxRate> {
        parse_bps(text).map(TaxRate)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bps(self.0, f)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Line discount percentage in basis points.
///
/// The order entry form does not expose a discount yet, so every line
/// carries `DiscountRate::zero()` unless a caller supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Largest discount: the whole value.
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a discount rate, clamped to 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > Self::MAX_BPS {
            DiscountRate(Self::MAX_BPS)
        } else {
            DiscountRate(bps)
        }
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Forgiving parse for the discount field: unparsable, negative or
    /// over-100% text counts as no discount.
    pub fn parse_or_zero(text: &str) -> DiscountRate {
        parse_bps(text).map(DiscountRate).unwrap_or_default()
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bps(self.0, f)
    }
}

fn parse_bps(text: &str) -> Option<u32> {
    parse_scaled(text, 2)
        .filter(|bps| (0..=10_000).contains(bps))
        .map(|bps| bps as u32)
}

// =============================================================================
// Item
// =============================================================================

/// A sellable item from the backend catalog (`GET /items`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Backend primary key.
    #[serde(rename = "ItemID")]
    pub id: i64,

    /// Business identifier shown next to the name in the picker.
    #[serde(rename = "ItemCode")]
    pub code: String,

    #[serde(rename = "ItemName")]
    pub name: String,

    /// Catalog sale rate, the default rate of a new order line.
    /// Negative or out-of-range rates are rejected when the catalog loads.
    #[serde(rename = "SalRate")]
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "string")]
    pub sale_rate: Money,

    /// Harmonized System Nomenclature code.
    #[serde(rename = "HSNCode", default)]
    pub hsn_code: Option<String>,

    #[serde(rename = "TaxCode", default)]
    pub tax_code: Option<String>,

    // Rename stays in its own attribute so ts-rs picks it up.
    #[serde(rename = "CGSTCode")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cgst_code: Option<String>,

    #[serde(rename = "SGSTCode")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sgst_code: Option<String>,

    #[serde(rename = "IGSTCode")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub igst_code: Option<String>,

    #[serde(rename = "UTGSTCode")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub utgst_code: Option<String>,

    /// Item's own GST rate, when the catalog carries one.
    /// Only consulted under `RateSource::PerItem`.
    #[serde(rename = "GSTRate")]
    #[serde(default, skip_serializing_if = "Option::is_none", with = "gst_percent")]
    #[ts(type = "string | null")]
    pub gst_rate: Option<TaxRate>,
}

impl Item {
    /// Snapshot of the fields an order line keeps after the item is added.
    pub fn to_ref(&self) -> ItemRef {
        ItemRef {
            id: self.id,
            code: self.code.clone(),
            name: self.name.clone(),
            hsn_code: self.hsn_code.clone(),
            tax_code: self.tax_code.clone(),
            cgst_code: self.cgst_code.clone(),
            sgst_code: self.sgst_code.clone(),
            igst_code: self.igst_code.clone(),
            utgst_code: self.utgst_code.clone(),
        }
    }
}

/// Item data frozen onto an order line (snapshot pattern).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub hsn_code: Option<String>,
    pub tax_code: Option<String>,
    pub cgst_code: Option<String>,
    pub sgst_code: Option<String>,
    pub igst_code: Option<String>,
    pub utgst_code: Option<String>,
}

/// The backend writes GST rates as percentages (`"GSTRate": 18`).
mod gst_percent {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::TaxRate;

    pub fn serialize<S: Serializer>(rate: &Option<TaxRate>, s: S) -> Result<S::Ok, S::Error> {
        match rate {
            Some(rate) => s.collect_str(rate),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<TaxRate>, D::Error> {
        let text = match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(D::Error::custom(format!("invalid GST rate: {}", other)));
            }
        };
        TaxRate::parse_percent(&text)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid GST rate: {}", text)))
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer account from the backend (`GET /customers`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    #[serde(rename = "CustomerID")]
    pub id: i64,

    #[serde(rename = "CustomerName")]
    pub name: String,

    #[serde(rename = "Code")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub code: Option<String>,

    #[serde(rename = "GSTNo")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub gst_no: Option<String>,
}

// =============================================================================
// Company Session
// =============================================================================

/// Who is entering the order, for which company and fiscal year.
///
/// Passed explicitly to whatever needs it; nothing in the core reads
/// session data from ambient storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompanySession {
    pub user_id: i64,
    pub company_id: i64,
    pub company_name: String,
    /// Selected fiscal-year tag, sent to the backend as the `Prefix`.
    pub fiscal_year: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
