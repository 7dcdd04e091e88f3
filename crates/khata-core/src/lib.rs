//! # khata-core: Order Pricing Logic for Khata
//!
//! Everything the order-entry screen computes, as pure functions with no
//! I/O: line pricing, GST, order totals, the customer form and the
//! request payloads sent to the billing backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Khata Order Entry                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Front-end (React Native) / khata CLI              │   │
//! │  │    Customer picker ──► Item picker ──► Line form ──► Create     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 order-entry commands + state                    │   │
//! │  │    quote_order, list_items, build_customer_request, ...         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ khata-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────────┐     │   │
//! │  │   │  money   │  │   line   │  │  order   │  │ submission │     │   │
//! │  │   │ quantity │  │   tax    │  │ summary  │  │  customer  │     │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └────────────┘     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBAL STATE                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                  Billing backend (owns persistence)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`], [`quantity`] - Fixed-point paise and hundredths
//! - [`types`] - Backend records (Item, Customer) and rates
//! - [`tax`] - GST rate selection and CGST/SGST/UTGST/IGST split
//! - [`line`] - Order line pricing and the rate/value edit draft
//! - [`summary`] - Order totals
//! - [`order`] - The order under composition
//! - [`submission`] - Order-creation request payload
//! - [`customer`] - Customer registration form and request
//! - [`catalog`] - Item/customer lists and search
//! - [`validation`], [`error`] - Input rules and typed errors
//!
//! ## Example Usage
//!
//! ```rust
//! use khata_core::{derive_line, Item, Money};
//!
//! let item = Item {
//!     id: 1,
//!     code: "CEM-50".to_string(),
//!     name: "Cement 50kg".to_string(),
//!     sale_rate: Money::from_rupees(100),
//!     hsn_code: None,
//!     tax_code: None,
//!     cgst_code: None,
//!     sgst_code: None,
//!     igst_code: None,
//!     utgst_code: None,
//!     gst_rate: None,
//! };
//!
//! // 3 × ₹100 at 18% GST
//! let line = derive_line(&item, "3", "");
//! assert_eq!(line.value(), Money::from_rupees(300));
//! assert_eq!(line.tax().cgst, Money::from_rupees(27));
//! assert_eq!(line.tax().sgst, Money::from_rupees(27));
//! assert_eq!(line.amount().to_string(), "354.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod customer;
pub mod error;
pub mod line;
pub mod money;
pub mod order;
pub mod parse;
pub mod quantity;
pub mod submission;
pub mod summary;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use customer::{AccountGroup, CustomerField, CustomerForm, FieldKind, NewCustomerRequest};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line::{derive_line, LineDraft, OrderLine, OrderLineCalculator, PriceDriver};
pub use money::Money;
pub use order::Order;
pub use quantity::Quantity;
pub use submission::{OrderRequest, OrderRequestLine, OrderRequestTotals};
pub use summary::{aggregate, OrderSummary};
pub use tax::{RateSource, TaxBreakdown, TaxPolicy, TaxSplit, DEFAULT_GST_RATE};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines in a single order.
///
/// Far above any real order; stops a stuck key or script from growing an
/// order without bound.
pub const MAX_ORDER_LINES: usize = 200;

/// Maximum length of an item/customer search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Maximum length of a customer form text field.
pub const MAX_TEXT_FIELD_LEN: usize = 100;

/// Largest quantity accepted on an order line (10 lakh units).
///
/// Larger text is treated as unparsable, so it prices as zero.
pub const MAX_QUANTITY: Quantity = Quantity::from_units(1_000_000);

/// Largest rate or value accepted from form text or the catalog (₹10 crore).
///
/// With [`MAX_QUANTITY`] and [`MAX_ORDER_LINES`] this keeps every line and
/// order total well inside `i64` paise.
pub const MAX_AMOUNT: Money = Money::from_rupees(100_000_000);
