//! # Catalog State
//!
//! Items and customers loaded once at startup from a JSON file shaped like
//! the backend's item-list and customer-list responses. Read-only
//! afterwards, so it is shared behind an `Arc` without a lock.

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use khata_core::Catalog;

use crate::error::ApiError;

/// Shared, read-only catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// Loads the catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let text = std::fs::read_to_string(path).map_err(|e| ApiError::catalog_io(path, e))?;
        let state = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            items = state.catalog.items.len(),
            customers = state.catalog.customers.len(),
            "Catalog loaded"
        );
        Ok(state)
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ApiError> {
        let catalog: Catalog = serde_json::from_str(text).map_err(ApiError::catalog_format)?;
        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_from_json() {
        let state = CatalogState::from_json(
            r#"{ "items": [ { "ItemID": 1, "ItemCode": "CEM-50",
                  "ItemName": "Cement 50kg", "SalRate": 350 } ],
                 "nextSerial": "SO-7" }"#,
        )
        .unwrap();
        assert_eq!(state.catalog().items.len(), 1);
        assert_eq!(state.catalog().next_serial, "SO-7");
        assert!(state.catalog().customers.is_empty());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = CatalogState::from_json("{ \"items\": [ {} ] }").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_negative_sale_rate_is_config_error() {
        let err = CatalogState::from_json(
            r#"{ "items": [ { "ItemID": 1, "ItemCode": "CEM-50",
                  "ItemName": "Cement 50kg", "SalRate": -350 } ] }"#,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = CatalogState::load(Path::new("/nonexistent/khata/catalog.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(err.message.contains("catalog.json"));
    }
}
