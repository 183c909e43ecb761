use super::fx_model::CurrencyPair;

/// Plans the minimal direct-fetch set: one `base -> X` pair for every
/// currency in use other than the base itself.
///
/// Anchoring every fetch at the base currency keeps the fetch count linear
/// in the number of currencies; every other rate is derived from these legs.
/// Pure function of its inputs; output order follows the input order.
pub fn plan_currency_pairs(currencies: &[String], base_currency: &str) -> Vec<CurrencyPair> {
    currencies
        .iter()
        .filter(|currency| currency.as_str() != base_currency)
        .map(|currency| CurrencyPair::new(base_currency, currency.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currencies(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_plans_base_to_every_other_currency() {
        let pairs = plan_currency_pairs(&currencies(&["CHF", "EUR", "USD"]), "USD");

        assert_eq!(
            pairs,
            vec![CurrencyPair::new("USD", "CHF"), CurrencyPair::new("USD", "EUR")]
        );
    }

    #[test]
    fn test_base_only_set_plans_nothing() {
        assert!(plan_currency_pairs(&currencies(&["USD"]), "USD").is_empty());
        assert!(plan_currency_pairs(&[], "USD").is_empty());
    }

    #[test]
    fn test_is_deterministic() {
        let set = currencies(&["CAD", "EUR", "GBP"]);
        assert_eq!(
            plan_currency_pairs(&set, "EUR"),
            plan_currency_pairs(&set, "EUR")
        );
    }
}
