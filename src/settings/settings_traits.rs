use crate::errors::Result;

/// Read-side contract the host application exposes for configuration values.
pub trait SettingsProviderTrait: Send + Sync {
    /// The configured base currency. Read once per initialization cycle;
    /// all triangulation pivots through it.
    fn get_base_currency(&self) -> Result<String>;

    /// A raw setting value by key, if one is stored.
    fn get_setting(&self, key: &str) -> Result<Option<String>>;
}
