use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("Exchange rate not found for {from}/{to}")]
    RateNotFound { from: String, to: String },

    #[error("No exchange rate found for {from}/{to} on {date}")]
    RateNotFoundForDate {
        from: String,
        to: String,
        date: NaiveDate,
    },

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("FX service is not initialized")]
    NotInitialized,
}
