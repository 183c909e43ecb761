use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::market_data::QuoteRequest;

/// Distinct-currency listings from the host application's stores.
pub trait CurrencySourceTrait: Send + Sync {
    /// Distinct non-empty currencies used by financial accounts.
    fn account_currencies(&self) -> Result<Vec<String>>;

    /// Distinct currencies used by tradable-instrument profiles.
    fn instrument_currencies(&self) -> Result<Vec<String>>;
}

/// Trait defining the contract for FX service operations.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    /// Rebuilds the rate table from scratch: discovers the currencies in
    /// use, plans the pairs to fetch and loads yesterday's closing rates.
    /// Must complete before conversions are served for the cycle.
    async fn initialize(&self) -> Result<()>;

    /// Re-runs the load step against the current plan, replacing the rate
    /// table wholesale (e.g. on a schedule).
    async fn reload_rates(&self) -> Result<()>;

    fn base_currency(&self) -> Result<String>;

    /// The currencies in use, falling back to `[base_currency]` when the
    /// directory came up empty.
    fn currencies(&self) -> Result<Vec<String>>;

    /// The planned direct-fetch pairs, as provider-facing descriptors.
    fn currency_pairs(&self) -> Result<Vec<QuoteRequest>>;

    /// The multiplicative factor from one currency into another, derived
    /// on demand through the base currency when not directly cached.
    fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal>;

    fn convert_currency(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal>;

    /// Degraded-mode conversion: an unresolvable pair is logged and the
    /// amount comes back unconverted. Callers that must not stop (valuation
    /// sweeps) use this; everyone else should prefer [`convert_currency`]
    /// and handle the error.
    ///
    /// [`convert_currency`]: FxServiceTrait::convert_currency
    fn convert_currency_with_fallback(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Decimal;

    /// Point-in-time conversion for an arbitrary date. Same-day requests are
    /// served from the rate table; anything else queries the market-data
    /// collaborator and fails explicitly when no rate can be established.
    async fn convert_currency_for_date(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal>;
}
