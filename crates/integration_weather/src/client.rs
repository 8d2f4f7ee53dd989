//! OpenWeatherMap weather client
//!
//! HTTP client for the OpenWeatherMap current weather API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiErrorBody, ApiResponse, CurrentConditions};

/// Credential values shipped in sample configs that must never be sent upstream
const PLACEHOLDER_API_KEYS: &[&str] = &["your_api_key_here", "your_api_key", "changeme"];

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No usable API key is configured
    #[error("OpenWeatherMap API key is not configured")]
    MissingApiKey,

    /// The provider does not know the requested city
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// The provider rejected the API key
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The provider is throttling requests
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success response
    #[error("HTTP {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider-supplied message or the status reason
        message: String,
    },

    /// No response was received (connection failure or timeout)
    #[error("Service unreachable: {0}")]
    Unreachable(String),

    /// The request could not be built or sent
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be decoded into current conditions
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key (`appid` query parameter)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl WeatherConfig {
    /// The configured API key, if it is present and not a placeholder
    #[must_use]
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .filter(|key| {
                !PLACEHOLDER_API_KEYS
                    .iter()
                    .any(|placeholder| key.eq_ignore_ascii_case(placeholder))
            })
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a city name
    async fn get_current(&self, city: &str) -> Result<CurrentConditions, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new OpenWeatherMap client with the given configuration
    ///
    /// A missing API key is not an error here; it is reported on the first
    /// lookup so the server can start without one.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build the current weather endpoint URL
    fn current_weather_url(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }

    /// Classify a transport-level failure
    fn map_send_error(err: &reqwest::Error) -> WeatherError {
        if err.is_connect() || err.is_timeout() {
            WeatherError::Unreachable(err.to_string())
        } else {
            WeatherError::RequestFailed(err.to_string())
        }
    }

    /// Classify a non-success response
    fn map_status(status: StatusCode, body: &str, city: &str) -> WeatherError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string()
            });

        match status {
            StatusCode::NOT_FOUND => WeatherError::CityNotFound(city.to_string()),
            StatusCode::UNAUTHORIZED => WeatherError::InvalidApiKey,
            StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimited(message),
            _ => WeatherError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Normalize a decoded response into current conditions
    fn parse_conditions(
        response: ApiResponse,
        queried_city: &str,
    ) -> Result<CurrentConditions, WeatherError> {
        let description = response
            .weather
            .into_iter()
            .next()
            .and_then(|w| w.description)
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| {
                WeatherError::ParseError("No weather description in response".to_string())
            })?;

        if !response.main.temp.is_finite() {
            return Err(WeatherError::ParseError(
                "Temperature is not a number".to_string(),
            ));
        }

        let city = response
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| queried_city.to_string());

        let (wind_speed, wind_direction) = response
            .wind
            .map_or((None, None), |w| (w.speed, w.deg));

        Ok(CurrentConditions {
            city,
            temperature: response.main.temp,
            description,
            humidity: response.main.humidity,
            wind_speed,
            wind_direction,
            pressure: response.main.pressure,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn get_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let api_key = self
            .config
            .usable_api_key()
            .ok_or(WeatherError::MissingApiKey)?;

        let url = self.current_weather_url();
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        if !status.is_success() {
            let err = Self::map_status(status, &body, city);
            warn!(status = status.as_u16(), error = %err, "Weather provider returned an error");
            return Err(err);
        }

        let api_response: ApiResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        Self::parse_conditions(api_response, city)
    }
}
