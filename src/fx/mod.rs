//! FX module - currency discovery, pair planning, rate loading and resolution.

pub mod currency_directory;
pub mod fx_errors;
pub mod fx_model;
pub mod fx_service;
pub mod fx_traits;
pub mod pair_planner;
pub mod rate_cache;

pub use currency_directory::CurrencyDirectory;
pub use fx_errors::FxError;
pub use fx_model::CurrencyPair;
pub use fx_service::FxService;
pub use fx_traits::{CurrencySourceTrait, FxServiceTrait};
pub use pair_planner::plan_currency_pairs;
pub use rate_cache::RateCache;
