//! Application state shared across handlers

use std::sync::Arc;

use application::WeatherService;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Weather lookups and stored history
    pub weather_service: Arc<WeatherService>,
}

impl AppState {
    /// Create state around a weather service
    #[must_use]
    pub fn new(weather_service: WeatherService) -> Self {
        Self {
            weather_service: Arc::new(weather_service),
        }
    }
}
