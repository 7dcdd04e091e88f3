//! # Order Submission Payload
//!
//! Maps a validated [`Order`] onto the billing backend's order-creation
//! request. Sending it (endpoint, headers, retries) is the caller's job.
//!
//! ## Payload Shape
//! ```json
//! {
//!   "CompanyID": 3, "UserID": 11, "Prefix": "2024-25",
//!   "DocNo": "SO-0042", "DocDate": "2024-10-24", "CustomerID": 501,
//!   "Items": [
//!     { "ItemID": 1, "ItemCode": "CEM-50", "HSN": "2523", "TaxCode": "GST18",
//!       "CGSTCode": "C9", "SGSTCode": "S9",
//!       "Qty": "3.00", "Rate": "100.00", "Value": "300.00", "Disc(%)": "0.00",
//!       "DiscAmt": "0.00", "Taxable": "300.00", "TaxRate": "18.00",
//!       "CGST": "27.00", "SGST": "27.00", "UTGST": "0.00", "IGST": "0.00",
//!       "TaxAmt": "54.00", "Amount": "354.00" }
//!   ],
//!   "Totals": { "Qty": "3.00", "Value": "300.00", ... "GrandTotal": "354.00" }
//! }
//! ```
//!
//! Numbers are two-decimal strings, the same rendering the entry screen
//! shows, so the backend stores exactly what the user saw.

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::line::OrderLine;
use crate::order::Order;
use crate::summary::OrderSummary;

/// Placeholder the entry screen shows for a missing HSN or tax code.
const NOT_AVAILABLE: &str = "N/A";

/// The backend's order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct OrderRequest {
    #[serde(rename = "CompanyID")]
    pub company_id: i64,
    #[serde(rename = "UserID")]
    pub user_id: i64,
    /// Fiscal-year prefix of the document series.
    #[serde(rename = "Prefix")]
    pub prefix: String,
    #[serde(rename = "DocNo")]
    pub doc_no: String,
    /// ISO date (`YYYY-MM-DD`).
    #[serde(rename = "DocDate")]
    pub doc_date: String,
    #[serde(rename = "CustomerID")]
    pub customer_id: i64,
    #[serde(rename = "Items")]
    pub items: Vec<OrderRequestLine>,
    #[serde(rename = "Totals")]
    pub totals: OrderRequestTotals,
}

/// One line of the order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct OrderRequestLine {
    #[serde(rename = "ItemID")]
    pub item_id: i64,
    #[serde(rename = "ItemCode")]
    pub item_code: String,
    #[serde(rename = "HSN")]
    pub hsn: String,
    #[serde(rename = "TaxCode")]
    pub tax_code: String,
    /// Component tax codes, sent only when the catalog carries them.
    #[serde(rename = "CGSTCode")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cgst_code: Option<String>,
    #[serde(rename = "SGSTCode")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sgst_code: Option<String>,
    #[serde(rename = "IGSTCode")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub igst_code: Option<String>,
    #[serde(rename = "UTGSTCode")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub utgst_code: Option<String>,
    #[serde(rename = "Qty")]
    pub qty: String,
    #[serde(rename = "Rate")]
    pub rate: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Disc(%)")]
    pub disc_percent: String,
    #[serde(rename = "DiscAmt")]
    pub disc_amt: String,
    #[serde(rename = "Taxable")]
    pub taxable: String,
    #[serde(rename = "TaxRate")]
    pub tax_rate: String,
    #[serde(rename = "CGST")]
    pub cgst: String,
    #[serde(rename = "SGST")]
    pub sgst: String,
    #[serde(rename = "UTGST")]
    pub utgst: String,
    #[serde(rename = "IGST")]
    pub igst: String,
    #[serde(rename = "TaxAmt")]
    pub tax_amt: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

/// Order-level totals of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct OrderRequestTotals {
    #[serde(rename = "Qty")]
    pub qty: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Discount")]
    pub discount: String,
    #[serde(rename = "Taxable")]
    pub taxable: String,
    #[serde(rename = "CGST")]
    pub cgst: String,
    #[serde(rename = "SGST")]
    pub sgst: String,
    #[serde(rename = "UTGST")]
    pub utgst: String,
    #[serde(rename = "IGST")]
    pub igst: String,
    #[serde(rename = "TaxAmt")]
    pub tax_amt: String,
    #[serde(rename = "GrandTotal")]
    pub grand_total: String,
}

impl OrderRequest {
    /// Builds the request for `order`.
    ///
    /// ## Errors
    /// Validation error when the order has no customer or no lines.
    pub fn build(order: &Order) -> CoreResult<OrderRequest> {
        order.validate_for_submission()?;
        let customer = order.customer().ok_or_else(|| ValidationError::Required {
            field: "customer".to_string(),
        })?;
        let session = order.session();

        Ok(OrderRequest {
            company_id: session.company_id,
            user_id: session.user_id,
            prefix: session.fiscal_year.clone(),
            doc_no: order.doc_no().to_string(),
            doc_date: order.date().format("%Y-%m-%d").to_string(),
            customer_id: customer.id,
            items: order.lines().iter().map(OrderRequestLine::from).collect(),
            totals: OrderRequestTotals::from(&order.summary()),
        })
    }
}

impl From<&OrderLine> for OrderRequestLine {
    fn from(line: &OrderLine) -> Self {
        let item = line.item();
        let tax = line.tax();
        OrderRequestLine {
            item_id: item.id,
            item_code: item.code.clone(),
            hsn: item.hsn_code.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            tax_code: item.tax_code.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            cgst_code: item.cgst_code.clone(),
            sgst_code: item.sgst_code.clone(),
            igst_code: item.igst_code.clone(),
            utgst_code: item.utgst_code.clone(),
            qty: line.quantity().to_string(),
            rate: line.rate().to_string(),
            value: line.value().to_string(),
            disc_percent: line.discount_rate().to_string(),
            disc_amt: line.discount().to_string(),
            taxable: line.taxable().to_string(),
            tax_rate: line.tax_rate().to_string(),
            cgst: tax.cgst.to_string(),
            sgst: tax.sgst.to_string(),
            utgst: tax.utgst.to_string(),
            igst: tax.igst.to_string(),
            tax_amt: line.tax_amount().to_string(),
            amount: line.amount().to_string(),
        }
    }
}

impl From<&OrderSummary> for OrderRequestTotals {
    fn from(summary: &OrderSummary) -> Self {
        OrderRequestTotals {
            qty: summary.total_quantity.to_string(),
            value: summary.total_value.to_string(),
            discount: summary.total_discount.to_string(),
            taxable: summary.total_taxable.to_string(),
            cgst: summary.tax.cgst.to_string(),
            sgst: summary.tax.sgst.to_string(),
            utgst: summary.tax.utgst.to_string(),
            igst: summary.tax.igst.to_string(),
            tax_amt: summary.total_tax.to_string(),
            grand_total: summary.grand_total.to_string(),
        }
    }
}
