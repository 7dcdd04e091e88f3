//! # Config Commands

use tracing::debug;

use crate::state::AppConfig;

/// Gets the active configuration (session, tax policy, currency).
pub fn get_config(config: &AppConfig) -> AppConfig {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_serializes_policy() {
        let json = serde_json::to_value(get_config(&AppConfig::default())).unwrap();
        assert_eq!(json["taxPolicy"]["split"], "intra_state");
        assert_eq!(json["taxPolicy"]["rateSource"], "fixed");
        assert_eq!(json["currencySymbol"], "₹");
    }
}
