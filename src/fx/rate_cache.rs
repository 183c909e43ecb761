use std::collections::HashMap;

use log::error;
use rust_decimal::Decimal;

use super::fx_model::CurrencyPair;

/// In-memory table of same-day conversion factors, keyed by directed pair:
/// `amount_in_to = amount_in_from * factor`.
///
/// The table is rebuilt wholesale at the start of each initialization cycle
/// and extended incrementally as the resolver derives new cross rates.
/// Absent pairs stay absent; there are no sentinel values.
#[derive(Debug, Default)]
pub struct RateCache {
    rates: HashMap<CurrencyPair, Decimal>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn get(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates.get(&CurrencyPair::new(from, to)).copied()
    }

    /// Records a factor for `pair` exactly as given.
    pub fn insert(&mut self, pair: CurrencyPair, rate: Decimal) {
        self.rates.insert(pair, rate);
    }

    /// Records a factor together with its reciprocal, keeping both
    /// directions in step. A zero rate cannot be inverted; the forward
    /// direction is still stored.
    pub fn insert_with_inverse(&mut self, pair: CurrencyPair, rate: Decimal) {
        if rate.is_zero() {
            error!("Zero exchange rate for {}. Cannot store inverse.", pair);
            self.rates.insert(pair, rate);
            return;
        }

        self.rates.insert(pair.inverse(), Decimal::ONE / rate);
        self.rates.insert(pair, rate);
    }

    /// Derives `from -> to` by pivoting through `pivot`:
    /// `factor(from, pivot) * factor(pivot, to)`. `None` when either leg is
    /// missing.
    pub fn triangulate(&self, from: &str, to: &str, pivot: &str) -> Option<Decimal> {
        let leg_in = self.get(from, pivot)?;
        let leg_out = self.get(pivot, to)?;
        Some(leg_in * leg_out)
    }

    pub fn clear(&mut self) {
        self.rates.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insert_with_inverse_stores_reciprocal() {
        let mut cache = RateCache::new();
        cache.insert_with_inverse(CurrencyPair::new("USD", "EUR"), dec!(0.90));

        assert_eq!(cache.get("USD", "EUR"), Some(dec!(0.90)));
        let inverse = cache.get("EUR", "USD").unwrap();
        assert!((inverse - Decimal::ONE / dec!(0.90)).abs() < dec!(0.0000001));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_rate_skips_inverse() {
        let mut cache = RateCache::new();
        cache.insert_with_inverse(CurrencyPair::new("USD", "XXX"), Decimal::ZERO);

        assert_eq!(cache.get("USD", "XXX"), Some(Decimal::ZERO));
        assert_eq!(cache.get("XXX", "USD"), None);
    }

    #[test]
    fn test_triangulate_multiplies_both_legs() {
        let mut cache = RateCache::new();
        cache.insert_with_inverse(CurrencyPair::new("USD", "EUR"), dec!(0.90));
        cache.insert_with_inverse(CurrencyPair::new("USD", "GBP"), dec!(0.80));

        // EUR -> GBP = factor(EUR, USD) * factor(USD, GBP)
        let derived = cache.triangulate("EUR", "GBP", "USD").unwrap();
        let expected = (Decimal::ONE / dec!(0.90)) * dec!(0.80);
        assert!((derived - expected).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_triangulate_with_missing_leg_is_none() {
        let mut cache = RateCache::new();
        cache.insert_with_inverse(CurrencyPair::new("USD", "EUR"), dec!(0.90));

        assert_eq!(cache.triangulate("EUR", "GBP", "USD"), None);
        assert_eq!(cache.triangulate("GBP", "EUR", "USD"), None);
    }

    #[test]
    fn test_clear_empties_the_table() {
        let mut cache = RateCache::new();
        cache.insert_with_inverse(CurrencyPair::new("USD", "EUR"), dec!(0.90));
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("USD", "EUR"), None);
    }
}
