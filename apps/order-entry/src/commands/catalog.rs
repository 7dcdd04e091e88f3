//! # Catalog Commands
//!
//! Search commands behind the item and customer pickers.
//!
//! ## Picker Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Select Item: [ cem        ]                                            │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │  CEM-50   Cement 50kg                        ₹350.00          │     │
//! │  │  CEM-25   Cement 25kg                        ₹180.00          │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! │                                                                         │
//! │  search_items("cem") → name or code contains "cem", any case            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use khata_core::{Customer, Item};

use crate::error::ApiError;
use crate::state::{AppConfig, CatalogState};

/// One row of the item picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOption {
    pub code: String,
    pub name: String,
    /// Catalog rate formatted for display (`₹350.00`).
    pub rate: String,
    pub hsn_code: Option<String>,
}

impl ItemOption {
    fn new(item: &Item, config: &AppConfig) -> Self {
        ItemOption {
            code: item.code.clone(),
            name: item.name.clone(),
            rate: config.format_currency(item.sale_rate),
            hsn_code: item.hsn_code.clone(),
        }
    }
}

/// Searches the item catalog by name or code.
pub fn search_items(
    config: &AppConfig,
    catalog: &CatalogState,
    query: &str,
) -> Result<Vec<ItemOption>, ApiError> {
    debug!(query = %query, "search_items command");

    let items = catalog.catalog().search_items(query)?;
    Ok(items
        .into_iter()
        .map(|item| ItemOption::new(item, config))
        .collect())
}

/// Searches customers by name or code.
pub fn search_customers(catalog: &CatalogState, query: &str) -> Result<Vec<Customer>, ApiError> {
    debug!(query = %query, "search_customers command");

    let customers = catalog.catalog().search_customers(query)?;
    Ok(customers.into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn catalog() -> CatalogState {
        CatalogState::from_json(
            r#"{
                "items": [
                    { "ItemID": 1, "ItemCode": "CEM-50", "ItemName": "Cement 50kg",
                      "SalRate": 350, "HSNCode": "2523" },
                    { "ItemID": 2, "ItemCode": "SAND-M", "ItemName": "M-Sand (per cft)",
                      "SalRate": 62.5 }
                ],
                "customers": [
                    { "CustomerID": 501, "CustomerName": "Sharma Traders" },
                    { "CustomerID": 502, "CustomerName": "Mehta Builders", "Code": "MB" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_search_items_formats_rate() {
        let config = AppConfig::default();
        let options = search_items(&config, &catalog(), "CEM").unwrap();

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].code, "CEM-50");
        assert_eq!(options[0].rate, "₹350.00");
        assert_eq!(options[0].hsn_code.as_deref(), Some("2523"));
    }

    #[test]
    fn test_search_items_empty_query_lists_all() {
        let config = AppConfig::default();
        let options = search_items(&config, &catalog(), "").unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].rate, "₹62.50");
    }

    #[test]
    fn test_search_customers() {
        let customers = search_customers(&catalog(), "mb").unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].id, 502);
    }

    #[test]
    fn test_query_too_long() {
        let err = search_customers(&catalog(), &"a".repeat(150)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
