//! Weather service
//!
//! Orchestrates the fetch-and-persist pipeline for current conditions and the
//! read/delete paths over stored history. Every gateway and store error is
//! passed through to the caller unchanged.

use std::{fmt, sync::Arc};

use domain::{CityName, WeatherRecord};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{DEFAULT_HISTORY_LIMIT, WeatherGatewayPort, WeatherHistoryPort},
};

/// Service for fetching and recording weather observations
pub struct WeatherService {
    gateway: Arc<dyn WeatherGatewayPort>,
    history: Arc<dyn WeatherHistoryPort>,
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService")
            .field("gateway", &"<WeatherGatewayPort>")
            .field("history", &"<WeatherHistoryPort>")
            .finish()
    }
}

impl Clone for WeatherService {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            history: Arc::clone(&self.history),
        }
    }
}

impl WeatherService {
    /// Create a new weather service
    #[must_use]
    pub fn new(
        gateway: Arc<dyn WeatherGatewayPort>,
        history: Arc<dyn WeatherHistoryPort>,
    ) -> Self {
        Self { gateway, history }
    }

    /// Fetch current weather for a city and record it
    ///
    /// The fetched record is written to history before it is returned; if
    /// the write fails the whole call fails.
    ///
    /// # Errors
    ///
    /// Returns a validation error ("City name is required") for empty or
    /// whitespace-only input without contacting the gateway. Gateway and
    /// store errors propagate unchanged.
    #[instrument(skip(self))]
    pub async fn get_weather(&self, city: &str) -> Result<WeatherRecord, ApplicationError> {
        let city = CityName::parse(city)?;

        let fetched = self.gateway.fetch(&city).await?;
        debug!(
            city = %fetched.city,
            temperature = fetched.temperature,
            description = %fetched.description,
            "Fetched current weather"
        );

        let saved = self.history.insert(&fetched).await?;
        info!(id = ?saved.id, city = %saved.city, "Recorded weather observation");

        Ok(saved)
    }

    /// Get stored observations for a city, most recent first
    ///
    /// `city` is matched exactly and is not validated here: an empty or
    /// unknown city yields an empty list. `limit` defaults to
    /// [`DEFAULT_HISTORY_LIMIT`].
    #[instrument(skip(self))]
    pub async fn get_weather_history(
        &self,
        city: &str,
        limit: Option<usize>,
    ) -> Result<Vec<WeatherRecord>, ApplicationError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        let records = self.history.find_by_city(city, limit).await?;

        debug!(count = records.len(), "Loaded weather history");
        Ok(records)
    }

    /// Delete every stored observation for a city
    ///
    /// # Returns
    /// The number of records removed (0 if none matched)
    #[instrument(skip(self))]
    pub async fn delete_weather_history(&self, city: &str) -> Result<u64, ApplicationError> {
        let deleted = self.history.delete_by_city(city).await?;

        info!(deleted, "Deleted weather history");
        Ok(deleted)
    }

    /// Check whether the history store is reachable
    pub async fn is_storage_healthy(&self) -> bool {
        self.history.ping().await.is_ok()
    }
}
