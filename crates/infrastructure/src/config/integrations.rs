//! Weather provider (OpenWeatherMap) configuration.

use integration_weather::WeatherConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Conventional environment variable consulted when no key is configured
pub const OPENWEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Weather provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// OpenWeatherMap API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_weather_timeout() -> u64 {
    10
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            timeout_secs: default_weather_timeout(),
        }
    }
}

impl WeatherAppConfig {
    /// Fill in the API key from `OPENWEATHER_API_KEY` when none is configured
    pub fn apply_env_fallback(&mut self) {
        self.apply_key_fallback(std::env::var(OPENWEATHER_API_KEY_ENV).ok());
    }

    fn apply_key_fallback(&mut self, fallback: Option<String>) {
        let configured = self
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty());

        if !configured {
            self.api_key = fallback
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from);
        }
    }

    /// Whether an API key is present (placeholder detection happens in the client)
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the HTTP client configuration, exposing the key only here
    #[must_use]
    pub fn to_client_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_openweathermap() {
        let config = WeatherAppConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.has_api_key());
    }

    #[test]
    fn fallback_fills_missing_key() {
        let mut config = WeatherAppConfig::default();
        config.apply_key_fallback(Some("from-env".to_string()));
        assert_eq!(
            config.to_client_config().api_key.as_deref(),
            Some("from-env")
        );
    }

    #[test]
    fn fallback_does_not_override_configured_key() {
        let mut config = WeatherAppConfig {
            api_key: Some(SecretString::from("configured")),
            ..Default::default()
        };
        config.apply_key_fallback(Some("from-env".to_string()));
        assert_eq!(
            config.to_client_config().api_key.as_deref(),
            Some("configured")
        );
    }

    #[test]
    fn fallback_replaces_blank_key_and_ignores_blank_env() {
        let mut config = WeatherAppConfig {
            api_key: Some(SecretString::from("  ")),
            ..Default::default()
        };
        config.apply_key_fallback(Some(String::new()));
        assert!(!config.has_api_key());

        config.apply_key_fallback(Some("real".to_string()));
        assert!(config.has_api_key());
    }

    #[test]
    fn api_key_is_never_serialized() {
        let config = WeatherAppConfig {
            api_key: Some(SecretString::from("super-secret")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = WeatherAppConfig {
            api_key: Some(SecretString::from("super-secret")),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn deserializes_key_from_json() {
        let json = r#"{"api_key":"abc","timeout_secs":3}"#;
        let config: WeatherAppConfig = serde_json::from_str(json).unwrap();
        let client = config.to_client_config();
        assert_eq!(client.api_key.as_deref(), Some("abc"));
        assert_eq!(client.timeout_secs, 3);
        assert_eq!(client.base_url, "https://api.openweathermap.org/data/2.5");
    }
}
