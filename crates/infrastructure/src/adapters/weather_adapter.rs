//! Weather adapter - Implements WeatherGatewayPort using integration_weather

use application::{error::ApplicationError, ports::WeatherGatewayPort};
use async_trait::async_trait;
use chrono::Utc;
use domain::{CityName, WeatherRecord};
use integration_weather::{
    CurrentConditions, OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for the OpenWeatherMap current weather API
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"<WeatherClient>")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: impl WeatherClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::MissingApiKey => ApplicationError::Configuration(
                "OpenWeatherMap API key is not configured".into(),
            ),
            WeatherError::CityNotFound(city) => ApplicationError::CityNotFound(city),
            WeatherError::InvalidApiKey => ApplicationError::InvalidCredentials,
            WeatherError::RateLimited(message) => ApplicationError::RateLimited(message),
            WeatherError::Api { message, .. } => ApplicationError::Upstream(message),
            WeatherError::Unreachable(e) => ApplicationError::Unreachable(e),
            WeatherError::RequestFailed(e) => ApplicationError::Request(e),
            WeatherError::ParseError(e) => {
                ApplicationError::Upstream(format!("Invalid response: {e}"))
            },
        }
    }

    /// Stamp fetched conditions with the observation time
    fn to_record(conditions: CurrentConditions) -> WeatherRecord {
        WeatherRecord::new(
            conditions.city,
            conditions.temperature,
            conditions.description,
            Utc::now(),
        )
        .with_humidity(conditions.humidity)
        .with_wind_speed(conditions.wind_speed)
        .with_wind_direction(conditions.wind_direction)
        .with_pressure(conditions.pressure)
    }
}

#[async_trait]
impl WeatherGatewayPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city))]
    async fn fetch(&self, city: &CityName) -> Result<WeatherRecord, ApplicationError> {
        let result = self
            .client
            .get_current(city.as_str())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(conditions) => {
                debug!(
                    temperature = conditions.temperature,
                    description = %conditions.description,
                    "Retrieved current weather"
                );
            },
            Err(e) => {
                debug!(error = %e, kind = e.kind(), "Failed to get current weather");
            },
        }

        result.map(Self::to_record)
    }
}
