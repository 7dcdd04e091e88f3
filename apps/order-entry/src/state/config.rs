//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`KHATA_*`)
//! 2. Defaults (this file)
//!
//! ## Environment Variables
//! ```text
//! ┌────────────────────────┬──────────────────────────────┬────────────────┐
//! │ Variable               │ Meaning                      │ Default        │
//! ├────────────────────────┼──────────────────────────────┼────────────────┤
//! │ KHATA_TAX_RATE         │ GST percentage ("18", "5")   │ 18             │
//! │ KHATA_TAX_SPLIT        │ intra_state | inter_state |  │ intra_state    │
//! │                        │ union_territory              │                │
//! │ KHATA_TAX_RATE_SOURCE  │ fixed | per_item             │ fixed          │
//! │ KHATA_CURRENCY_SYMBOL  │ prefix for displayed amounts │ ₹              │
//! │ KHATA_COMPANY_ID       │ backend company id           │ 1              │
//! │ KHATA_COMPANY_NAME     │ shown in the header          │ Khata Company  │
//! │ KHATA_USER_ID          │ backend user id              │ 1              │
//! │ KHATA_FISCAL_YEAR      │ document prefix ("2024-25")  │ current FY     │
//! └────────────────────────┴──────────────────────────────┴────────────────┘
//! ```
//!
//! An invalid value is logged and ignored; the default stays in effect.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use chrono::{Datelike, Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use khata_core::{CompanySession, Money, OrderLineCalculator, TaxPolicy, TaxRate};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Company and user the orders are entered for.
    pub session: CompanySession,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// GST rate, split and rate source used to price lines.
    pub tax_policy: TaxPolicy,
}

impl Default for AppConfig {
    /// Development defaults: company 1, user 1, current fiscal year,
    /// 18% intra-state GST.
    fn default() -> Self {
        AppConfig {
            session: CompanySession {
                user_id: 1,
                company_id: 1,
                company_name: "Khata Company".to_string(),
                fiscal_year: fiscal_year_for(Local::now().date_naive()),
            },
            currency_symbol: "₹".to_string(),
            tax_policy: TaxPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Creates the configuration from `KHATA_*` environment variables and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(text) = lookup("KHATA_TAX_RATE") {
            match TaxRate::parse_percent(&text) {
                Some(rate) => config.tax_policy.rate = rate,
                None => warn!(value = %text, "Ignoring invalid KHATA_TAX_RATE"),
            }
        }

        if let Some(text) = lookup("KHATA_TAX_SPLIT") {
            match parse_keyword(&text) {
                Some(split) => config.tax_policy.split = split,
                None => warn!(value = %text, "Ignoring invalid KHATA_TAX_SPLIT"),
            }
        }

        if let Some(text) = lookup("KHATA_TAX_RATE_SOURCE") {
            match parse_keyword(&text) {
                Some(source) => config.tax_policy.rate_source = source,
                None => warn!(value = %text, "Ignoring invalid KHATA_TAX_RATE_SOURCE"),
            }
        }

        if let Some(symbol) = lookup("KHATA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(text) = lookup("KHATA_COMPANY_ID") {
            match text.trim().parse() {
                Ok(id) => config.session.company_id = id,
                Err(_) => warn!(value = %text, "Ignoring invalid KHATA_COMPANY_ID"),
            }
        }

        if let Some(text) = lookup("KHATA_USER_ID") {
            match text.trim().parse() {
                Ok(id) => config.session.user_id = id,
                Err(_) => warn!(value = %text, "Ignoring invalid KHATA_USER_ID"),
            }
        }

        if let Some(name) = lookup("KHATA_COMPANY_NAME") {
            config.session.company_name = name;
        }

        if let Some(year) = lookup("KHATA_FISCAL_YEAR") {
            config.session.fiscal_year = year;
        }

        config
    }

    /// Line calculator for the configured tax policy.
    pub fn calculator(&self) -> OrderLineCalculator {
        OrderLineCalculator::new(self.tax_policy)
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::Money;
    /// use khata_order_entry::state::AppConfig;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_paise(35400)), "₹354.00");
    /// assert_eq!(config.format_currency(Money::from_paise(-1234)), "-₹12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.currency_symbol, -amount)
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

/// Indian fiscal year (April to March) containing `date`, as `2024-25`.
pub fn fiscal_year_for(date: NaiveDate) -> String {
    let start = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1) % 100)
}

/// Parses a snake_case keyword (`inter_state`) into one of the policy enums.
fn parse_keyword<T: DeserializeOwned>(text: &str) -> Option<T> {
    let keyword = text.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(keyword)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use khata_core::{RateSource, TaxSplit};
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.tax_policy, TaxPolicy::default());
        assert_eq!(config.tax_policy.rate, TaxRate::from_bps(1800));
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.session.company_id, 1);
    }

    #[test]
    fn test_env_overrides() {
        let config = config_with(&[
            ("KHATA_TAX_RATE", "5"),
            ("KHATA_TAX_SPLIT", "inter-state"),
            ("KHATA_TAX_RATE_SOURCE", "PER_ITEM"),
            ("KHATA_COMPANY_ID", "3"),
            ("KHATA_USER_ID", " 11 "),
            ("KHATA_COMPANY_NAME", "Gupta Hardware"),
            ("KHATA_FISCAL_YEAR", "2024-25"),
            ("KHATA_CURRENCY_SYMBOL", "Rs. "),
        ]);

        assert_eq!(config.tax_policy.rate, TaxRate::from_bps(500));
        assert_eq!(config.tax_policy.split, TaxSplit::InterState);
        assert_eq!(config.tax_policy.rate_source, RateSource::PerItem);
        assert_eq!(config.session.company_id, 3);
        assert_eq!(config.session.user_id, 11);
        assert_eq!(config.session.company_name, "Gupta Hardware");
        assert_eq!(config.session.fiscal_year, "2024-25");
        assert_eq!(config.format_currency(Money::from_rupees(10)), "Rs. 10.00");
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = config_with(&[
            ("KHATA_TAX_RATE", "eighteen"),
            ("KHATA_TAX_SPLIT", "federal"),
            ("KHATA_COMPANY_ID", "abc"),
        ]);
        assert_eq!(config.tax_policy, TaxPolicy::default());
        assert_eq!(config.session.company_id, 1);
    }

    #[test]
    fn test_fiscal_year_for() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(fiscal_year_for(date(2024, 10, 24)), "2024-25");
        assert_eq!(fiscal_year_for(date(2025, 3, 31)), "2024-25");
        assert_eq!(fiscal_year_for(date(2025, 4, 1)), "2025-26");
        assert_eq!(fiscal_year_for(date(2099, 12, 1)), "2099-00");
    }

    #[test]
    fn test_format_currency() {
        let config = config_with(&[]);
        assert_eq!(config.format_currency(Money::from_paise(35400)), "₹354.00");
        assert_eq!(config.format_currency(Money::zero()), "₹0.00");
        assert_eq!(config.format_currency(Money::from_paise(-1)), "-₹0.01");
    }
}
