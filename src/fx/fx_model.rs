use std::fmt;

use serde::{Deserialize, Serialize};

use crate::market_data::{DataSource, QuoteRequest};

/// A directed currency pair.
///
/// Kept structural rather than as a packed `USDEUR` symbol so nothing
/// downstream has to slice fixed-width strings back apart; the packed form
/// only exists at the provider boundary, via [`CurrencyPair::symbol`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The pair with its direction flipped.
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }

    /// Provider-facing symbol, e.g. "USDEUR".
    pub fn symbol(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Fetch descriptor for this pair against the given source.
    pub fn quote_request(&self, data_source: DataSource) -> QuoteRequest {
        QuoteRequest::new(self.symbol(), data_source)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_concatenates_codes() {
        let pair = CurrencyPair::new("USD", "EUR");
        assert_eq!(pair.symbol(), "USDEUR");
        assert_eq!(pair.to_string(), "USD/EUR");
    }

    #[test]
    fn test_inverse_flips_direction() {
        let pair = CurrencyPair::new("USD", "EUR");
        let inverse = pair.inverse();
        assert_eq!(inverse, CurrencyPair::new("EUR", "USD"));
        assert_eq!(inverse.inverse(), pair);
    }

    #[test]
    fn test_quote_request_carries_source() {
        let request = CurrencyPair::new("USD", "CHF").quote_request(DataSource::Yahoo);
        assert_eq!(request.symbol, "USDCHF");
        assert_eq!(request.data_source, DataSource::Yahoo);
    }
}
