//! Console configuration.

use std::str::FromStr;

use rust_decimal::Decimal;

use retaildesk_core::TaxRate;
use retaildesk_events::ACTIVITY_LOG_CAP;
use retaildesk_invoicing::{HISTORY_CAP, IssuerSettings, StoreProfile};

pub const ENV_TAX_RATE: &str = "RETAILDESK_TAX_RATE";
pub const ENV_CURRENCY: &str = "RETAILDESK_CURRENCY";
pub const ENV_STORE_NAME: &str = "RETAILDESK_STORE_NAME";
pub const ENV_GSTIN: &str = "RETAILDESK_GSTIN";
pub const ENV_SUPPORT: &str = "RETAILDESK_SUPPORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub tax_rate: TaxRate,
    pub currency_symbol: String,
    pub store: StoreProfile,
    pub history_cap: usize,
    pub activity_cap: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            tax_rate: TaxRate::GST_18,
            currency_symbol: "₹".to_string(),
            store: StoreProfile::default(),
            history_cap: HISTORY_CAP,
            activity_cap: ACTIVITY_LOG_CAP,
        }
    }
}

impl ConsoleConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; unset keys keep their defaults and
    /// unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TAX_RATE) {
            match Decimal::from_str(raw.trim())
                .map_err(|e| e.to_string())
                .and_then(|d| TaxRate::new(d).map_err(|e| e.to_string()))
            {
                Ok(rate) => config.tax_rate = rate,
                Err(error) => tracing::warn!(
                    key = ENV_TAX_RATE,
                    value = %raw,
                    %error,
                    "invalid tax rate; using default"
                ),
            }
        }
        if let Some(symbol) = non_blank(lookup(ENV_CURRENCY)) {
            config.currency_symbol = symbol;
        }
        if let Some(name) = non_blank(lookup(ENV_STORE_NAME)) {
            config.store.name = name;
        }
        if let Some(gstin) = non_blank(lookup(ENV_GSTIN)) {
            config.store.gstin = gstin;
        }
        if let Some(support) = non_blank(lookup(ENV_SUPPORT)) {
            config.store.support = support;
        }

        config
    }

    pub fn issuer_settings(&self) -> IssuerSettings {
        IssuerSettings {
            tax_rate: self.tax_rate,
            currency_symbol: self.currency_symbol.clone(),
            store: self.store.clone(),
            history_cap: self.history_cap,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_store_policy() {
        let config = ConsoleConfig::from_lookup(|_| None);
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.tax_rate.fraction(), dec!(0.18));
        assert_eq!(config.history_cap, 20);
        assert_eq!(config.activity_cap, 40);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            (ENV_TAX_RATE, "0.05"),
            (ENV_CURRENCY, "Rs."),
            (ENV_STORE_NAME, "Corner Store"),
        ]));
        assert_eq!(config.tax_rate.fraction(), dec!(0.05));
        assert_eq!(config.currency_symbol, "Rs.");
        assert_eq!(config.store.name, "Corner Store");
        assert_eq!(config.store.gstin, StoreProfile::default().gstin);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            (ENV_TAX_RATE, "eighteen"),
            (ENV_CURRENCY, "   "),
        ]));
        assert_eq!(config.tax_rate, TaxRate::GST_18);
        assert_eq!(config.currency_symbol, "₹");

        let config = ConsoleConfig::from_lookup(lookup(&[(ENV_TAX_RATE, "1.8")]));
        assert_eq!(config.tax_rate, TaxRate::GST_18);
    }
}
