use std::sync::Arc;

use log::warn;

use crate::constants::PROPERTY_CURRENCIES;
use crate::errors::Result;
use crate::settings::SettingsProviderTrait;

use super::fx_traits::CurrencySourceTrait;

/// Discovers the distinct set of currencies the application actually uses.
pub struct CurrencyDirectory {
    currency_source: Arc<dyn CurrencySourceTrait>,
    settings: Arc<dyn SettingsProviderTrait>,
}

impl CurrencyDirectory {
    pub fn new(
        currency_source: Arc<dyn CurrencySourceTrait>,
        settings: Arc<dyn SettingsProviderTrait>,
    ) -> Self {
        Self {
            currency_source,
            settings,
        }
    }

    /// Union of account, instrument and operator-configured currencies,
    /// deduplicated, empties dropped, sorted ascending. An empty result is
    /// valid; callers fall back to the base currency.
    pub fn collect(&self) -> Result<Vec<String>> {
        let mut currencies = self.currency_source.account_currencies()?;
        currencies.extend(self.currency_source.instrument_currencies()?);
        currencies.extend(self.extra_currencies()?);

        currencies.retain(|currency| !currency.is_empty());
        currencies.sort();
        currencies.dedup();

        Ok(currencies)
    }

    /// Operator-supplied extra currencies, stored as a JSON string list
    /// under the `CURRENCIES` settings key. A malformed value is skipped.
    fn extra_currencies(&self) -> Result<Vec<String>> {
        let raw = match self.settings.get_setting(PROPERTY_CURRENCIES)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(currencies) => Ok(currencies),
            Err(e) => {
                warn!(
                    "Ignoring malformed '{}' setting: {}",
                    PROPERTY_CURRENCIES, e
                );
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubCurrencySource {
        accounts: Vec<String>,
        instruments: Vec<String>,
    }

    impl CurrencySourceTrait for StubCurrencySource {
        fn account_currencies(&self) -> Result<Vec<String>> {
            Ok(self.accounts.clone())
        }

        fn instrument_currencies(&self) -> Result<Vec<String>> {
            Ok(self.instruments.clone())
        }
    }

    struct StubSettings {
        currencies_property: Option<String>,
    }

    impl SettingsProviderTrait for StubSettings {
        fn get_base_currency(&self) -> Result<String> {
            Ok("USD".to_string())
        }

        fn get_setting(&self, key: &str) -> Result<Option<String>> {
            if key == PROPERTY_CURRENCIES {
                Ok(self.currencies_property.clone())
            } else {
                Ok(None)
            }
        }
    }

    fn directory(
        accounts: &[&str],
        instruments: &[&str],
        currencies_property: Option<&str>,
    ) -> CurrencyDirectory {
        CurrencyDirectory::new(
            Arc::new(StubCurrencySource {
                accounts: accounts.iter().map(|c| c.to_string()).collect(),
                instruments: instruments.iter().map(|c| c.to_string()).collect(),
            }),
            Arc::new(StubSettings {
                currencies_property: currencies_property.map(|p| p.to_string()),
            }),
        )
    }

    #[test]
    fn test_collect_unions_dedupes_and_sorts() {
        let directory = directory(
            &["EUR", "USD", "CHF"],
            &["USD", "GBP"],
            Some(r#"["JPY", "EUR"]"#),
        );

        assert_eq!(
            directory.collect().unwrap(),
            vec!["CHF", "EUR", "GBP", "JPY", "USD"]
        );
    }

    #[test]
    fn test_collect_drops_empty_entries() {
        let directory = directory(&["", "EUR"], &[""], None);
        assert_eq!(directory.collect().unwrap(), vec!["EUR"]);
    }

    #[test]
    fn test_empty_sources_yield_empty_directory() {
        let directory = directory(&[], &[], None);
        assert!(directory.collect().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_property_is_ignored() {
        let directory = directory(&["USD"], &[], Some("not json"));
        assert_eq!(directory.collect().unwrap(), vec!["USD"]);
    }
}
