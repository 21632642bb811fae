//! Service configuration.
//!
//! Settings come from a TOML file (city, default coordinates, model path,
//! ordered provider list) with secrets pulled from the environment,
//! `.env`-friendly via dotenv. The provider list order in the file is the
//! failover priority order.
//!
//! An empty provider list is accepted here — running in monitor-only mode
//! without SOS capability is legitimate. The dispatcher rejects it at
//! dispatch time instead.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{ProviderCredential, Reading};

/// Default TOML config path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "cycmon.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// City name passed to the weather API.
    #[serde(default = "default_target_city")]
    pub target_city: String,

    /// Fallback coordinates when the weather API is unavailable.
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,

    /// Fallback pressure when the weather API is unavailable. 1005 hPa sits
    /// exactly on the NORMAL boundary, so a dead API reads as calm weather.
    #[serde(default = "default_pressure")]
    pub default_pressure_hpa: f64,

    /// Path to the trained model artifact. Absent or unloadable means the
    /// rule classifier runs instead.
    pub model_path: Option<PathBuf>,

    /// Weather API key. Usually supplied via the OWM_API_KEY environment
    /// variable rather than the file.
    pub owm_api_key: Option<String>,

    /// Postgres connection string for the record sink. Usually supplied via
    /// DATABASE_URL.
    pub database_url: Option<String>,

    /// Ordered provider credentials; first entry is attempted first.
    #[serde(default)]
    pub providers: Vec<ProviderCredential>,
}

fn default_target_city() -> String {
    "Visakhapatnam".to_string()
}

fn default_latitude() -> f64 {
    17.6868
}

fn default_longitude() -> f64 {
    83.2185
}

fn default_pressure() -> f64 {
    1005.0
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            target_city: default_target_city(),
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            default_pressure_hpa: default_pressure(),
            model_path: None,
            owm_api_key: None,
            database_url: None,
            providers: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Load configuration: `.env`, then the TOML file if present (defaults
    /// otherwise), then environment overrides for secrets.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            AppConfig::default()
        };

        if let Ok(key) = std::env::var("OWM_API_KEY") {
            config.owm_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = Some(url);
        }

        Ok(config)
    }

    /// The reading substituted when the weather API is unavailable.
    pub fn default_reading(&self) -> Reading {
        Reading {
            latitude: self.default_latitude,
            longitude: self.default_longitude,
            pressure_hpa: self.default_pressure_hpa,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let raw = r#"
            target_city = "Visakhapatnam"
            default_latitude = 17.6868
            default_longitude = 83.2185
            default_pressure_hpa = 1005.0
            model_path = "cyclone_model.json"

            [[providers]]
            label = "primary"
            account_sid = "AC_primary"
            auth_token = "token1"
            sender_number = "+15075195618"

            [[providers]]
            label = "secondary"
            account_sid = "AC_secondary"
            auth_token = "token2"
            sender_number = "+14176076960"
        "#;

        let config: AppConfig = toml::from_str(raw).expect("full config should parse");
        assert_eq!(config.target_city, "Visakhapatnam");
        assert_eq!(config.providers.len(), 2);
        // File order is failover order.
        assert_eq!(config.providers[0].label, "primary");
        assert_eq!(config.providers[1].label, "secondary");
        assert_eq!(
            config.model_path.as_deref(),
            Some(Path::new("cyclone_model.json"))
        );
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config.target_city, "Visakhapatnam");
        assert_eq!(config.default_pressure_hpa, 1005.0);
        assert!(config.providers.is_empty());
        assert!(config.model_path.is_none());
    }

    #[test]
    fn test_default_reading_matches_configured_fallbacks() {
        let config = AppConfig::default();
        let reading = config.default_reading();
        assert_eq!(reading.latitude, 17.6868);
        assert_eq!(reading.longitude, 83.2185);
        assert_eq!(reading.pressure_hpa, 1005.0);
    }

    #[test]
    fn test_provider_missing_token_is_rejected() {
        let raw = r#"
            [[providers]]
            label = "primary"
            account_sid = "AC_primary"
            sender_number = "+15075195618"
        "#;
        let result: Result<AppConfig, _> = toml::from_str(raw);
        assert!(result.is_err(), "a provider without auth_token must not parse");
    }
}
