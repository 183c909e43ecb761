pub mod market_data_constants;
pub mod market_data_errors;
pub mod market_data_model;
pub mod market_data_traits;

// Re-export the public interface
pub use market_data_constants::*;
pub use market_data_errors::MarketDataError;
pub use market_data_model::{
    DataSource, Granularity, HistoricalPrices, MarketPrice, QuoteQuery, QuoteRequest,
};
pub use market_data_traits::MarketDataProviderTrait;
