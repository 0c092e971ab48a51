use std::sync::Arc;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

use crate::error::AppError;
use crate::i18n::locale::Locale;
use crate::relay::client::{FormRelay, HttpFormRelay, LogOnlyRelay, RelaySettings};

/// Site configuration.
///
/// Layered, later sources winning:
/// - built-in defaults
/// - `sala.toml` in the working directory (optional)
/// - `SALA__*` environment variables, e.g. `SALA__RELAY__ENDPOINT`
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub site_name: String,
    /// Used when neither the locale cookie nor `Accept-Language` decide.
    pub default_locale: Locale,
    /// Enables the built-in demo accounts for the admin and portal shells.
    pub demo_mode: bool,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Hosted form endpoint. Submissions are only logged when unset.
    #[serde(default)]
    pub endpoint: Option<String>,
    pub subject_prefix: String,
    pub timeout_secs: u64,
}

impl SiteConfig {
    /// Load from the default file and the environment.
    pub fn load() -> Result<Self, AppError> {
        let builder = Self::defaults()
            .map_err(config_error)?
            .add_source(File::with_name("sala").required(false))
            .add_source(
                Environment::with_prefix("SALA")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    /// A builder pre-populated with the built-in defaults.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("site_name", "Sala Academy")?
            .set_default("default_locale", "en")?
            .set_default("demo_mode", true)?
            .set_default("relay.subject_prefix", "[Sala Academy]")?
            .set_default("relay.timeout_secs", 10)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)
    }

    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            subject_prefix: self.relay.subject_prefix.clone(),
        }
    }

    /// The relay submissions go through: HTTP when an endpoint is set,
    /// log-only otherwise.
    pub fn build_relay(&self) -> Result<Arc<dyn FormRelay>, AppError> {
        let endpoint = self
            .relay
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());

        match endpoint {
            Some(raw) => {
                let url = Url::parse(raw).map_err(|e| {
                    AppError::Config(format!("Invalid relay endpoint '{}': {}", raw, e))
                })?;
                tracing::info!(endpoint = %url, "Form relay enabled");
                let relay =
                    HttpFormRelay::new(url, Duration::from_secs(self.relay.timeout_secs))?;
                Ok(Arc::new(relay))
            }
            None => {
                tracing::warn!("No relay endpoint configured; form submissions will only be logged");
                Ok(Arc::new(LogOnlyRelay))
            }
        }
    }
}

fn config_error(e: ConfigError) -> AppError {
    AppError::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_builder(SiteConfig::defaults().unwrap()).unwrap();
        assert_eq!(config.site_name, "Sala Academy");
        assert_eq!(config.default_locale, Locale::En);
        assert!(config.demo_mode);
        assert!(config.relay.endpoint.is_none());
        assert_eq!(config.relay.timeout_secs, 10);
        assert_eq!(config.relay_settings().subject_prefix, "[Sala Academy]");
    }

    #[test]
    fn test_overrides() {
        let builder = SiteConfig::defaults()
            .unwrap()
            .set_override("default_locale", "km")
            .unwrap()
            .set_override("relay.endpoint", "https://relay.example.com/f/abc")
            .unwrap();
        let config = SiteConfig::from_builder(builder).unwrap();
        assert_eq!(config.default_locale, Locale::Km);
        assert_eq!(
            config.relay.endpoint.as_deref(),
            Some("https://relay.example.com/f/abc")
        );
        assert!(config.build_relay().is_ok());
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let builder = SiteConfig::defaults()
            .unwrap()
            .set_override("relay.endpoint", "not a url")
            .unwrap();
        let config = SiteConfig::from_builder(builder).unwrap();
        assert!(matches!(config.build_relay(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        let builder = SiteConfig::defaults()
            .unwrap()
            .set_override("default_locale", "fr")
            .unwrap();
        assert!(SiteConfig::from_builder(builder).is_err());
    }
}
