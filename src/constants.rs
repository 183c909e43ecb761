/// Date format for provider-facing date strings
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Settings key holding the operator-supplied extra currency list (a JSON string array)
pub const PROPERTY_CURRENCIES: &str = "CURRENCIES";

/// Seconds to wait on a market-data call before treating it as "no price"
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
