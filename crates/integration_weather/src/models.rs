//! Weather data models
//!
//! Wire types for the OpenWeatherMap current weather response and the
//! normalized conditions the client hands to callers.

use serde::{Deserialize, Serialize};

/// Current conditions for one city, normalized from the provider response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Canonical city name reported by the provider
    pub city: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Condition summary (e.g. "light rain")
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity: Option<f64>,
    /// Wind speed in m/s
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees (0-360)
    pub wind_direction: Option<f64>,
    /// Atmospheric pressure in hPa
    pub pressure: Option<f64>,
}

/// Raw response from `GET /weather`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub name: Option<String>,
    pub main: MainData,
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
    #[serde(default)]
    pub wind: Option<WindData>,
}

/// `main` block: temperature, pressure, humidity
#[derive(Debug, Deserialize)]
pub(crate) struct MainData {
    pub temp: f64,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

/// One entry of the `weather` array
#[derive(Debug, Deserialize)]
pub(crate) struct WeatherEntry {
    #[serde(default)]
    pub description: Option<String>,
}

/// `wind` block
#[derive(Debug, Deserialize)]
pub(crate) struct WindData {
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub deg: Option<f64>,
}

/// Error body returned on non-success responses, e.g.
/// `{"cod":"404","message":"city not found"}`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_response() {
        let json = r#"{
            "coord": {"lon": 2.35, "lat": 48.85},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 18.3, "feels_like": 17.9, "pressure": 1016, "humidity": 62},
            "wind": {"speed": 4.1, "deg": 250},
            "dt": 1717243200,
            "name": "Paris",
            "cod": 200
        }"#;

        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.name.as_deref(), Some("Paris"));
        assert!((response.main.temp - 18.3).abs() < f64::EPSILON);
        assert_eq!(response.main.pressure, Some(1016.0));
        assert_eq!(response.main.humidity, Some(62.0));
        assert_eq!(
            response.weather[0].description.as_deref(),
            Some("clear sky")
        );
        let wind = response.wind.unwrap();
        assert_eq!(wind.speed, Some(4.1));
        assert_eq!(wind.deg, Some(250.0));
    }

    #[test]
    fn deserialize_minimal_response() {
        let json = r#"{"main": {"temp": -2.5}}"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert!(response.name.is_none());
        assert!(response.weather.is_empty());
        assert!(response.wind.is_none());
        assert!(response.main.humidity.is_none());
    }

    #[test]
    fn deserialize_requires_temperature() {
        let json = r#"{"main": {"humidity": 50}, "name": "Oslo"}"#;
        assert!(serde_json::from_str::<ApiResponse>(json).is_err());
    }

    #[test]
    fn deserialize_error_body() {
        let json = r#"{"cod":"404","message":"city not found"}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.message.as_deref(), Some("city not found"));
    }
}
