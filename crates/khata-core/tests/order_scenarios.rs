//! End-to-end pricing scenarios: catalog → lines → order → request.

use chrono::NaiveDate;
use khata_core::{
    aggregate, Catalog, CompanySession, CoreError, LineDraft, Money, Order, OrderLine,
    OrderLineCalculator, OrderRequest, Quantity, RateSource, TaxPolicy, TaxRate, TaxSplit,
    ValidationError,
};

const CATALOG: &str = r#"{
    "items": [
        { "ItemID": 1, "ItemCode": "CEM-50", "ItemName": "Cement 50kg", "SalRate": 100,
          "HSNCode": "2523", "TaxCode": "GST28", "GSTRate": 28 },
        { "ItemID": 2, "ItemCode": "NAIL-1", "ItemName": "Wire Nails 1in", "SalRate": "0.35" }
    ],
    "customers": [
        { "CustomerID": 501, "CustomerName": "Sharma Traders", "Code": "C501" }
    ],
    "nextSerial": "SO-0042"
}"#;

fn catalog() -> Catalog {
    serde_json::from_str(CATALOG).unwrap()
}

fn session() -> CompanySession {
    CompanySession {
        user_id: 11,
        company_id: 3,
        company_name: "Gupta Hardware".to_string(),
        fiscal_year: "2024-25".to_string(),
    }
}

fn new_order(catalog: &Catalog) -> Order {
    let date = NaiveDate::from_ymd_opt(2024, 10, 24).unwrap();
    Order::new(session(), date, catalog.next_serial.clone())
}

#[test]
fn test_single_line_scenario() {
    let catalog = catalog();
    let item = catalog.find_item("CEM-50").unwrap();
    let line = OrderLineCalculator::default().derive_line(item, "3", "");

    assert_eq!(line.value().to_string(), "300.00");
    assert_eq!(line.taxable().to_string(), "300.00");
    assert_eq!(line.tax_amount().to_string(), "54.00");
    assert_eq!(line.amount().to_string(), "354.00");
}

#[test]
fn test_two_line_order_scenario() {
    let catalog = catalog();
    let item = catalog.find_item("CEM-50").unwrap();
    let calc = OrderLineCalculator::default();

    let mut order = new_order(&catalog);
    order.select_customer(catalog.find_customer(501).unwrap().clone());
    order.add_line(calc.derive_line(item, "3", "")).unwrap();
    order.add_line(calc.derive_line(item, "3", "")).unwrap();

    let summary = order.summary();
    assert_eq!(summary.line_count, 2);
    assert_eq!(summary.total_value.to_string(), "600.00");
    assert_eq!(summary.total_tax.to_string(), "108.00");
    assert_eq!(summary.tax.cgst.to_string(), "54.00");
    assert_eq!(summary.tax.sgst.to_string(), "54.00");
    assert!(summary.tax.igst.is_zero());
    assert_eq!(summary.grand_total.to_string(), "708.00");

    let request = OrderRequest::build(&order).unwrap();
    assert_eq!(request.doc_no, "SO-0042");
    assert_eq!(request.totals.grand_total, "708.00");
}

#[test]
fn test_empty_quantity_scenario() {
    let catalog = catalog();
    let item = catalog.find_item("CEM-50").unwrap();
    let line = OrderLineCalculator::default().derive_line(item, "", "250");

    assert!(line.quantity().is_zero());
    assert!(line.value().is_zero());
    assert!(line.amount().is_zero());
}

#[test]
fn test_aggregate_is_order_independent() {
    let catalog = catalog();
    let calc = OrderLineCalculator::default();
    let cement = catalog.find_item("CEM-50").unwrap();
    let nails = catalog.find_item("NAIL-1").unwrap();

    let lines: Vec<OrderLine> = vec![
        calc.derive_line(cement, "2.5", ""),
        calc.derive_line(nails, "1000", ""),
        calc.derive_line(cement, "1", "99.99"),
    ];
    let reversed: Vec<OrderLine> = lines.iter().rev().cloned().collect();

    let forward = aggregate(&lines);
    assert_eq!(forward, aggregate(&reversed));
    assert_eq!(
        forward.total_value,
        lines.iter().map(|line| line.value()).sum::<Money>()
    );
    assert_eq!(
        forward.total_quantity,
        lines.iter().map(|line| line.quantity()).sum::<Quantity>()
    );
}

#[test]
fn test_rate_value_round_trip_on_draft() {
    let catalog = catalog();
    let mut draft = LineDraft::new(catalog.find_item("NAIL-1").unwrap().clone());
    let calc = OrderLineCalculator::default();

    draft.edit_quantity("40");
    draft.edit_rate("0.35");
    let implied_value = draft.value().to_string();
    assert_eq!(implied_value, "14.00");

    draft.edit_value(&implied_value);
    assert_eq!(draft.rate(), Money::from_paise(35));
    assert_eq!(calc.price_draft(&draft).amount().to_string(), "16.52");
}

#[test]
fn test_inter_state_per_item_policy() {
    let catalog = catalog();
    let policy = TaxPolicy {
        rate: TaxRate::from_bps(1800),
        split: TaxSplit::InterState,
        rate_source: RateSource::PerItem,
    };
    let calc = OrderLineCalculator::new(policy);

    // Cement carries its own 28% rate; nails fall back to the policy's 18%
    let cement = calc.derive_line(catalog.find_item("CEM-50").unwrap(), "1", "");
    assert_eq!(cement.tax_rate(), TaxRate::from_bps(2800));
    assert_eq!(cement.tax().igst.to_string(), "28.00");
    assert!(cement.tax().cgst.is_zero());

    let nails = calc.derive_line(catalog.find_item("NAIL-1").unwrap(), "100", "");
    assert_eq!(nails.tax_rate(), TaxRate::from_bps(1800));
    assert_eq!(nails.tax().igst.to_string(), "6.30");
}

#[test]
fn test_submission_requires_customer_and_lines() {
    let catalog = catalog();
    let mut order = new_order(&catalog);

    let err = OrderRequest::build(&order).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::Required { ref field }) if field == "customer"
    ));

    order.select_customer(catalog.find_customer(501).unwrap().clone());
    let err = OrderRequest::build(&order).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::Required { ref field }) if field == "items"
    ));
}
