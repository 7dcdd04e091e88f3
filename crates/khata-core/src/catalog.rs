//! # Catalog
//!
//! Item and customer lists as delivered by the backend's item-list call,
//! together with the next document serial.
//!
//! ```json
//! { "items": [ { "ItemID": 1, "ItemCode": "CEM-50", ... } ],
//!   "customers": [ { "CustomerID": 501, "CustomerName": "Sharma Traders" } ],
//!   "nextSerial": "SO-0042" }
//! ```
//!
//! Lookups are linear: a company's catalog is a few hundred entries and is
//! searched as the user types.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Customer, Item};
use crate::validation::validate_search_query;

/// Items, customers and the next document serial for one company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub next_serial: String,
}

impl Catalog {
    /// Finds an item by exact code (case-insensitive).
    pub fn find_item(&self, code: &str) -> CoreResult<&Item> {
        let code = code.trim();
        self.items
            .iter()
            .find(|item| item.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| CoreError::ItemNotFound(code.to_string()))
    }

    /// Finds a customer by backend id.
    pub fn find_customer(&self, id: i64) -> CoreResult<&Customer> {
        self.customers
            .iter()
            .find(|customer| customer.id == id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))
    }

    /// Items whose name or code contains `query`, in catalog order.
    ///
    /// An empty query matches every item.
    pub fn search_items(&self, query: &str) -> CoreResult<Vec<&Item>> {
        let needle = validate_search_query(query)?.to_lowercase();
        Ok(self
            .items
            .iter()
            .filter(|item| matches(&needle, &item.name, Some(&item.code)))
            .collect())
    }

    /// Customers whose name or code contains `query`, in catalog order.
    pub fn search_customers(&self, query: &str) -> CoreResult<Vec<&Customer>> {
        let needle = validate_search_query(query)?.to_lowercase();
        Ok(self
            .customers
            .iter()
            .filter(|customer| matches(&needle, &customer.name, customer.code.as_deref()))
            .collect())
    }
}

fn matches(needle: &str, name: &str, code: Option<&str>) -> bool {
    needle.is_empty()
        || name.to_lowercase().contains(needle)
        || code.is_some_and(|code| code.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    const CATALOG_JSON: &str = r#"{
        "items": [
            { "ItemID": 1, "ItemCode": "CEM-50", "ItemName": "Cement 50kg", "SalRate": 350 },
            { "ItemID": 2, "ItemCode": "TMT-8", "ItemName": "TMT Bar 8mm", "SalRate": "62.50",
              "HSNCode": "7214", "GSTRate": 18 }
        ],
        "customers": [
            { "CustomerID": 501, "CustomerName": "Sharma Traders", "Code": "C501" },
            { "CustomerID": 502, "CustomerName": "Mehta Builders" }
        ],
        "nextSerial": "SO-0042"
    }"#;

    fn catalog() -> Catalog {
        serde_json::from_str(CATALOG_JSON).unwrap()
    }

    #[test]
    fn test_load_catalog_json() {
        let catalog = catalog();
        assert_eq!(catalog.items.len(), 2);
        assert_eq!(catalog.customers.len(), 2);
        assert_eq!(catalog.next_serial, "SO-0042");
        assert_eq!(catalog.items[1].sale_rate.paise(), 6250);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let catalog: Catalog = serde_json::from_str("{}").unwrap();
        assert!(catalog.items.is_empty());
        assert!(catalog.next_serial.is_empty());
    }

    #[test]
    fn test_find_item() {
        let catalog = catalog();
        assert_eq!(catalog.find_item("cem-50").unwrap().id, 1);
        assert!(matches!(
            catalog.find_item("PIPE-1"),
            Err(CoreError::ItemNotFound(ref code)) if code == "PIPE-1"
        ));
    }

    #[test]
    fn test_find_customer() {
        let catalog = catalog();
        assert_eq!(catalog.find_customer(502).unwrap().name, "Mehta Builders");
        assert!(matches!(
            catalog.find_customer(999),
            Err(CoreError::CustomerNotFound(_))
        ));
    }

    #[test]
    fn test_search_items_by_name_or_code() {
        let catalog = catalog();

        let hits = catalog.search_items("cement").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "CEM-50");

        let hits = catalog.search_items("tmt").unwrap();
        assert_eq!(hits[0].id, 2);

        assert_eq!(catalog.search_items("").unwrap().len(), 2);
        assert!(catalog.search_items("pipe").unwrap().is_empty());
    }

    #[test]
    fn test_search_customers() {
        let catalog = catalog();
        assert_eq!(catalog.search_customers("c501").unwrap()[0].id, 501);
        assert_eq!(catalog.search_customers("BUILD").unwrap()[0].id, 502);
    }

    #[test]
    fn test_search_query_too_long() {
        let err = catalog().search_items(&"x".repeat(101)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TooLong { .. })
        ));
    }
}
