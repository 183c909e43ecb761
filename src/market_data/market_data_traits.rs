use async_trait::async_trait;
use chrono::NaiveDate;

use super::market_data_errors::MarketDataError;
use super::market_data_model::{
    DataSource, Granularity, HistoricalPrices, MarketPrice, QuoteQuery, QuoteRequest,
};

/// Trait defining the contract a market-data collaborator must fulfil.
#[async_trait]
pub trait MarketDataProviderTrait: Send + Sync {
    /// The data source new fetch plans are issued against.
    fn primary_data_source(&self) -> DataSource;

    /// Daily prices for the requested symbols over `[from, to]`. Symbols the
    /// provider cannot price may be missing from the result entirely.
    async fn get_historical(
        &self,
        requests: &[QuoteRequest],
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<HistoricalPrices, MarketDataError>;

    /// Price for one symbol on one day, if the provider has it.
    async fn get(&self, query: &QuoteQuery) -> Result<Option<MarketPrice>, MarketDataError>;
}
