//! # Sales Order
//!
//! The one order being composed on the entry screen: header plus lines.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order::new(session, date, doc_no)                                      │
//! │       │                                                                 │
//! │       ├── select_customer(customer)                                     │
//! │       ├── add_line(line)       ──► appended at the end                  │
//! │       ├── remove_line(position) ─► later lines shift up                 │
//! │       │                                                                 │
//! │       ├── summary()            ──► recomputed from lines every call     │
//! │       │                                                                 │
//! │       └── validate_for_submission()                                     │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │           OrderRequest::build (submission.rs)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::line::OrderLine;
use crate::summary::{aggregate, OrderSummary};
use crate::types::{CompanySession, Customer};
use crate::validation::{validate_line_count, validate_order_ready};
use crate::MAX_ORDER_LINES;

/// A sales order under composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    session: CompanySession,
    #[ts(as = "String")]
    date: NaiveDate,
    /// Next document serial as issued by the backend with the item list.
    doc_no: String,
    customer: Option<Customer>,
    lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(session: CompanySession, date: NaiveDate, doc_no: impl Into<String>) -> Self {
        Order {
            session,
            date,
            doc_no: doc_no.into(),
            customer: None,
            lines: Vec::new(),
        }
    }

    pub fn session(&self) -> &CompanySession {
        &self.session
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn doc_no(&self) -> &str {
        &self.doc_no
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Selects (or replaces) the customer the order is for.
    pub fn select_customer(&mut self, customer: Customer) {
        self.customer = Some(customer);
    }

    /// Appends a priced line.
    ///
    /// ## Errors
    /// `OrderTooLarge` once the order holds `MAX_ORDER_LINES` lines.
    pub fn add_line(&mut self, line: OrderLine) -> CoreResult<()> {
        validate_line_count(self.lines.len()).map_err(|_| CoreError::OrderTooLarge {
            max: MAX_ORDER_LINES,
        })?;
        self.lines.push(line);
        Ok(())
    }

    /// Removes and returns the line at `position` (0-based).
    pub fn remove_line(&mut self, position: usize) -> CoreResult<OrderLine> {
        if position >= self.lines.len() {
            return Err(CoreError::LineOutOfRange {
                position,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(position))
    }

    /// Drops all lines and the customer, keeping the header.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.customer = None;
    }

    /// Order totals, recomputed from the current lines.
    pub fn summary(&self) -> OrderSummary {
        aggregate(&self.lines)
    }

    /// Checks the order can be submitted: a customer and at least one line.
    pub fn validate_for_submission(&self) -> CoreResult<()> {
        validate_order_ready(self.customer.as_ref(), self.lines.len())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::line::OrderLineCalculator;
    use crate::money::Money;
    use crate::types::Item;

    fn session() -> CompanySession {
        CompanySession {
            user_id: 11,
            company_id: 3,
            company_name: "Gupta Hardware".to_string(),
            fiscal_year: "2024-25".to_string(),
        }
    }

    fn customer() -> Customer {
        Customer {
            id: 501,
            name: "Sharma Traders".to_string(),
            code: Some("C501".to_string()),
            gst_no: None,
        }
    }

    fn line(code: &str, qty: &str) -> OrderLine {
        let item = Item {
            id: 1,
            code: code.to_string(),
            name: code.to_string(),
            sale_rate: Money::from_rupees(100),
            hsn_code: None,
            tax_code: None,
            cgst_code: None,
            sgst_code: None,
            igst_code: None,
            utgst_code: None,
            gst_rate: None,
        };
        OrderLineCalculator::default().derive_line(&item, qty, "")
    }

    fn new_order() -> Order {
        let date = NaiveDate::from_ymd_opt(2024, 10, 24).unwrap();
        Order::new(session(), date, "SO-0042")
    }

    #[test]
    fn test_new_order_is_empty() {
        let order = new_order();
        assert!(order.is_empty());
        assert!(order.customer().is_none());
        assert_eq!(order.doc_no(), "SO-0042");
        assert_eq!(order.summary(), OrderSummary::default());
    }

    #[test]
    fn test_add_and_remove_by_position() {
        let mut order = new_order();
        order.add_line(line("A", "1")).unwrap();
        order.add_line(line("B", "2")).unwrap();
        order.add_line(line("C", "3")).unwrap();

        let removed = order.remove_line(1).unwrap();
        assert_eq!(removed.item().code, "B");

        let codes: Vec<&str> = order.lines().iter().map(|l| l.item().code.as_str()).collect();
        assert_eq!(codes, vec!["A", "C"]);
        assert_eq!(order.summary().total_value, Money::from_rupees(400));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut order = new_order();
        order.add_line(line("A", "1")).unwrap();

        let err = order.remove_line(1).unwrap_err();
        assert!(matches!(err, CoreError::LineOutOfRange { position: 1, len: 1 }));
        assert_eq!(order.lines().len(), 1);
    }

    #[test]
    fn test_order_line_limit() {
        let mut order = new_order();
        for _ in 0..MAX_ORDER_LINES {
            order.add_line(line("A", "1")).unwrap();
        }
        let err = order.add_line(line("A", "1")).unwrap_err();
        assert!(matches!(err, CoreError::OrderTooLarge { max: MAX_ORDER_LINES }));
    }

    #[test]
    fn test_summary_follows_lines() {
        let mut order = new_order();
        order.add_line(line("A", "3")).unwrap();
        order.add_line(line("B", "3")).unwrap();
        assert_eq!(order.summary().grand_total.to_string(), "708.00");

        order.remove_line(0).unwrap();
        assert_eq!(order.summary().grand_total.to_string(), "354.00");
    }

    #[test]
    fn test_validate_requires_customer() {
        let mut order = new_order();
        order.add_line(line("A", "1")).unwrap();

        let err = order.validate_for_submission().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "customer"
        ));
    }

    #[test]
    fn test_validate_requires_lines() {
        let mut order = new_order();
        order.select_customer(customer());

        let err = order.validate_for_submission().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "items"
        ));
    }

    #[test]
    fn test_validate_ok_and_clear() {
        let mut order = new_order();
        order.select_customer(customer());
        order.add_line(line("A", "1")).unwrap();
        assert!(order.validate_for_submission().is_ok());

        order.clear();
        assert!(order.is_empty());
        assert!(order.customer().is_none());
        assert_eq!(order.doc_no(), "SO-0042");
    }
}
