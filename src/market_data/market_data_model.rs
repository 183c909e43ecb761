use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::market_data_constants::{DATA_SOURCE_MANUAL, DATA_SOURCE_YAHOO};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    Yahoo,
    Manual,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Yahoo => DATA_SOURCE_YAHOO,
            DataSource::Manual => DATA_SOURCE_MANUAL,
        }
    }
}

impl From<DataSource> for String {
    fn from(source: DataSource) -> Self {
        source.as_str().to_string()
    }
}

impl From<&str> for DataSource {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            DATA_SOURCE_YAHOO => DataSource::Yahoo,
            _ => DataSource::Manual,
        }
    }
}

/// Sampling granularity for historical requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
        }
    }
}

/// Descriptor for one symbol to fetch from a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub symbol: String,
    pub data_source: DataSource,
}

impl QuoteRequest {
    pub fn new(symbol: String, data_source: DataSource) -> Self {
        Self {
            symbol,
            data_source,
        }
    }
}

/// Point query for a single symbol on a single day.
///
/// Providers speaking a string-based wire protocol format the date with
/// [`crate::constants::DATE_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub symbol: String,
    pub data_source: DataSource,
    pub date: NaiveDate,
}

/// Closing price payload returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPrice {
    pub market_price: Decimal,
}

/// symbol -> date -> price. Providers may omit symbols or days they cannot price.
pub type HistoricalPrices = HashMap<String, HashMap<NaiveDate, MarketPrice>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_string_round_trip() {
        assert_eq!(DataSource::from(DataSource::Yahoo.as_str()), DataSource::Yahoo);
        assert_eq!(DataSource::from("yahoo"), DataSource::Yahoo);
        assert_eq!(DataSource::from("MANUAL"), DataSource::Manual);
        assert_eq!(DataSource::from("unknown"), DataSource::Manual);
    }

    #[test]
    fn test_granularity_tag() {
        assert_eq!(Granularity::Day.as_str(), "day");
    }
}
