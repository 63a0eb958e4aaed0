//! OpenWeatherMap upstream configuration.

use integration_openweather::{OpenWeatherConfig, UnitSystem};
use serde::{Deserialize, Serialize};

/// OpenWeatherMap client and credential settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherAppConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Unit system for temperature and wind speed, fixed at deployment time
    #[serde(default)]
    pub units: UnitSystem,

    /// Secret store path of the credential document
    #[serde(default = "default_secret_path")]
    pub secret_path: String,

    /// Field of the credential document holding the API key
    #[serde(default = "default_api_key_field")]
    pub api_key_field: String,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_secret_path() -> String {
    "skycast/openweather".to_string()
}

fn default_api_key_field() -> String {
    "weather-api-key".to_string()
}

impl Default for OpenWeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            units: UnitSystem::default(),
            secret_path: default_secret_path(),
            api_key_field: default_api_key_field(),
        }
    }
}

impl OpenWeatherAppConfig {
    /// Build the client configuration from these settings
    #[must_use]
    pub fn client_config(&self) -> OpenWeatherConfig {
        OpenWeatherConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            units: self.units,
        }
    }
}
