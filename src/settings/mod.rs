pub mod settings_traits;

pub use settings_traits::SettingsProviderTrait;
