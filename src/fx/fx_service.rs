use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::join;
use log::{debug, error, warn};
use rust_decimal::Decimal;
use tokio::time::timeout;

use crate::constants::DEFAULT_PROVIDER_TIMEOUT_SECS;
use crate::errors::Result;
use crate::market_data::{Granularity, MarketDataProviderTrait, QuoteQuery, QuoteRequest};
use crate::settings::SettingsProviderTrait;
use crate::utils::time_utils::{get_yesterday, is_today};

use super::currency_directory::CurrencyDirectory;
use super::fx_errors::FxError;
use super::fx_model::CurrencyPair;
use super::fx_traits::{CurrencySourceTrait, FxServiceTrait};
use super::pair_planner::plan_currency_pairs;
use super::rate_cache::RateCache;

/// Everything one initialization cycle pins down: the base currency, the
/// discovered currency set, the fetch plan and the rate table built from it.
struct FxState {
    base_currency: String,
    currencies: Vec<String>,
    pairs: Vec<CurrencyPair>,
    cache: RateCache,
}

/// Exchange-rate resolution service.
///
/// Owns the in-memory rate table and answers conversion queries for "now"
/// (synchronously, from the table) and for arbitrary historical dates
/// (asynchronously, via point queries against the market-data collaborator).
/// [`initialize`] must complete before conversions are served.
///
/// [`initialize`]: FxServiceTrait::initialize
pub struct FxService {
    directory: CurrencyDirectory,
    settings: Arc<dyn SettingsProviderTrait>,
    provider: Arc<dyn MarketDataProviderTrait>,
    provider_timeout: Duration,
    state: RwLock<Option<FxState>>,
}

impl FxService {
    pub fn new(
        settings: Arc<dyn SettingsProviderTrait>,
        currency_source: Arc<dyn CurrencySourceTrait>,
        provider: Arc<dyn MarketDataProviderTrait>,
    ) -> Self {
        Self {
            directory: CurrencyDirectory::new(currency_source, Arc::clone(&settings)),
            settings,
            provider,
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            state: RwLock::new(None),
        }
    }

    /// Overrides the timeout applied to every market-data call.
    pub fn with_provider_timeout(mut self, provider_timeout: Duration) -> Self {
        self.provider_timeout = provider_timeout;
        self
    }

    /// Builds the rate table for yesterday's close: one batch fetch for the
    /// planned pairs, the reciprocal of every observed rate, then cross
    /// rates between non-base currencies wherever both legs came back.
    ///
    /// Provider gaps and outright fetch failure degrade coverage; they are
    /// never escalated. Unresolved pairs surface later, at resolution time.
    async fn load_rates(
        &self,
        base_currency: &str,
        currencies: &[String],
        pairs: &[CurrencyPair],
    ) -> RateCache {
        let mut cache = RateCache::new();

        if pairs.is_empty() {
            return cache;
        }

        let yesterday = get_yesterday();
        let data_source = self.provider.primary_data_source();
        let requests: Vec<QuoteRequest> = pairs
            .iter()
            .map(|pair| pair.quote_request(data_source.clone()))
            .collect();

        let history = match timeout(
            self.provider_timeout,
            self.provider
                .get_historical(&requests, Granularity::Day, yesterday, yesterday),
        )
        .await
        {
            Ok(Ok(history)) => history,
            Ok(Err(e)) => {
                warn!(
                    "Historical rate fetch failed, continuing with an empty rate table: {}",
                    e
                );
                return cache;
            }
            Err(_) => {
                warn!(
                    "Historical rate fetch timed out after {:?}, continuing with an empty rate table",
                    self.provider_timeout
                );
                return cache;
            }
        };

        for pair in pairs {
            let price = history
                .get(&pair.symbol())
                .and_then(|days| days.get(&yesterday));

            match price {
                Some(price) => cache.insert_with_inverse(pair.clone(), price.market_price),
                None => debug!("No rate returned for {} on {}", pair, yesterday),
            }
        }

        // Cross rates between non-base currencies, pivoting through the base.
        // Each direction is derived from its own legs; a pair with a missing
        // leg stays absent.
        for from in currencies {
            for to in currencies {
                if from == to || from == base_currency || to == base_currency {
                    continue;
                }
                if cache.get(from, to).is_none() {
                    if let Some(rate) = cache.triangulate(from, to, base_currency) {
                        cache.insert(CurrencyPair::new(from.as_str(), to.as_str()), rate);
                    }
                }
            }
        }

        cache
    }

    /// Point query with the boundary policy applied: failures and timeouts
    /// are logged and collapse to "no price".
    async fn query_price(&self, pair: &CurrencyPair, date: NaiveDate) -> Option<Decimal> {
        let query = QuoteQuery {
            symbol: pair.symbol(),
            data_source: self.provider.primary_data_source(),
            date,
        };

        match timeout(self.provider_timeout, self.provider.get(&query)).await {
            Ok(Ok(Some(price))) => Some(price.market_price),
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                debug!("Point query for {} on {} failed: {}", pair, date, e);
                None
            }
            Err(_) => {
                debug!("Point query for {} on {} timed out", pair, date);
                None
            }
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&FxState) -> T) -> Result<T> {
        let guard = self
            .state
            .read()
            .map_err(|e| FxError::CacheError(e.to_string()))?;
        let state = guard.as_ref().ok_or(FxError::NotInitialized)?;
        Ok(f(state))
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    async fn initialize(&self) -> Result<()> {
        let base_currency = self.settings.get_base_currency()?;
        let currencies = self.directory.collect()?;
        let pairs = plan_currency_pairs(&currencies, &base_currency);

        debug!(
            "Initializing FX service: base {}, {} currencies, {} pairs to fetch",
            base_currency,
            currencies.len(),
            pairs.len()
        );

        let cache = self.load_rates(&base_currency, &currencies, &pairs).await;

        let mut guard = self
            .state
            .write()
            .map_err(|e| FxError::CacheError(e.to_string()))?;
        *guard = Some(FxState {
            base_currency,
            currencies,
            pairs,
            cache,
        });

        Ok(())
    }

    async fn reload_rates(&self) -> Result<()> {
        let (base_currency, currencies, pairs) = self.with_state(|state| {
            (
                state.base_currency.clone(),
                state.currencies.clone(),
                state.pairs.clone(),
            )
        })?;

        let cache = self.load_rates(&base_currency, &currencies, &pairs).await;

        let mut guard = self
            .state
            .write()
            .map_err(|e| FxError::CacheError(e.to_string()))?;
        if let Some(state) = guard.as_mut() {
            state.cache = cache;
        }

        Ok(())
    }

    fn base_currency(&self) -> Result<String> {
        self.with_state(|state| state.base_currency.clone())
    }

    fn currencies(&self) -> Result<Vec<String>> {
        self.with_state(|state| {
            if state.currencies.is_empty() {
                vec![state.base_currency.clone()]
            } else {
                state.currencies.clone()
            }
        })
    }

    fn currency_pairs(&self) -> Result<Vec<QuoteRequest>> {
        let data_source = self.provider.primary_data_source();
        self.with_state(|state| {
            state
                .pairs
                .iter()
                .map(|pair| pair.quote_request(data_source.clone()))
                .collect()
        })
    }

    fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal> {
        if from_currency == to_currency {
            return Ok(Decimal::ONE);
        }

        // Fast path: direct hit under the read lock.
        {
            let guard = self
                .state
                .read()
                .map_err(|e| FxError::CacheError(e.to_string()))?;
            let state = guard.as_ref().ok_or(FxError::NotInitialized)?;
            if let Some(rate) = state.cache.get(from_currency, to_currency) {
                return Ok(rate);
            }
        }

        // Slow path: derive through the base currency and memoize. Re-check
        // under the write lock so concurrent derivations of the same pair
        // stay single-writer.
        let mut guard = self
            .state
            .write()
            .map_err(|e| FxError::CacheError(e.to_string()))?;
        let state = guard.as_mut().ok_or(FxError::NotInitialized)?;

        if let Some(rate) = state.cache.get(from_currency, to_currency) {
            return Ok(rate);
        }

        let derived = state
            .cache
            .triangulate(from_currency, to_currency, &state.base_currency)
            .ok_or_else(|| FxError::RateNotFound {
                from: from_currency.to_string(),
                to: to_currency.to_string(),
            })?;

        state
            .cache
            .insert_with_inverse(CurrencyPair::new(from_currency, to_currency), derived);

        Ok(derived)
    }

    fn convert_currency(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal> {
        // A zero amount converts to zero even when no rate exists.
        if amount.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let rate = self.get_exchange_rate(from_currency, to_currency)?;
        Ok(amount * rate)
    }

    fn convert_currency_with_fallback(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Decimal {
        match self.convert_currency(amount, from_currency, to_currency) {
            Ok(converted) => converted,
            Err(e) => {
                error!(
                    "No exchange rate found for {}/{}, returning the amount unconverted: {}",
                    from_currency, to_currency, e
                );
                amount
            }
        }
    }

    async fn convert_currency_for_date(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal> {
        if amount.is_zero() {
            return Ok(Decimal::ZERO);
        }

        if is_today(date) {
            // Same-day conversions come from the rate table, never the provider.
            return self.convert_currency(amount, from_currency, to_currency);
        }

        if from_currency == to_currency {
            return Ok(amount);
        }

        validate_currency_code(from_currency)?;
        validate_currency_code(to_currency)?;

        let base_currency = self.with_state(|state| state.base_currency.clone())?;

        let pair = CurrencyPair::new(from_currency, to_currency);
        if let Some(price) = self.query_price(&pair, date).await {
            return Ok(amount * price);
        }

        // Derive through the base currency; both legs are fetched together.
        let base_from = CurrencyPair::new(base_currency.as_str(), from_currency);
        let base_to = CurrencyPair::new(base_currency.as_str(), to_currency);
        let (price_base_from, price_base_to) = join!(
            self.query_price(&base_from, date),
            self.query_price(&base_to, date)
        );

        match (price_base_from, price_base_to) {
            (Some(price_from), Some(price_to)) if !price_from.is_zero() => {
                let factor = (Decimal::ONE / price_from) * price_to;
                Ok(amount * factor)
            }
            _ => {
                error!(
                    "No exchange rate found for {}/{} on {}",
                    from_currency, to_currency, date
                );
                Err(FxError::RateNotFoundForDate {
                    from: from_currency.to_string(),
                    to: to_currency.to_string(),
                    date,
                }
                .into())
            }
        }
    }
}

fn validate_currency_code(code: &str) -> std::result::Result<(), FxError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FxError::InvalidCurrencyCode(code.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("usd").is_ok());
        assert!(validate_currency_code("EURO").is_err());
        assert!(validate_currency_code("E1").is_err());
        assert!(validate_currency_code("").is_err());
    }
}
