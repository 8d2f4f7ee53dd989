//! Weather record entity
//!
//! One normalized weather observation for one city at one instant.
//! Records are created transiently by the weather gateway, persisted once by
//! the history store (which assigns `id`) and never updated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized, persistable weather observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    /// Store-assigned identifier, `None` until the record is persisted
    #[serde(default)]
    pub id: Option<i64>,
    /// Canonical city name as returned by the upstream provider
    pub city: String,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Free-text condition summary (e.g. "clear sky")
    pub description: String,
    /// Relative humidity percentage (0-100)
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Wind speed in meters per second
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees (0-360)
    #[serde(default)]
    pub wind_direction: Option<f64>,
    /// Atmospheric pressure in hPa
    #[serde(default)]
    pub pressure: Option<f64>,
    /// When the observation was fetched (not the provider's observation time)
    pub timestamp: DateTime<Utc>,
}

impl WeatherRecord {
    /// Create a new, unpersisted record with the required fields
    #[must_use]
    pub fn new(
        city: impl Into<String>,
        temperature: f64,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            city: city.into(),
            temperature,
            description: description.into(),
            humidity: None,
            wind_speed: None,
            wind_direction: None,
            pressure: None,
            timestamp,
        }
    }

    /// Set the store-assigned identifier
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the relative humidity
    #[must_use]
    pub const fn with_humidity(mut self, humidity: Option<f64>) -> Self {
        self.humidity = humidity;
        self
    }

    /// Set the wind speed
    #[must_use]
    pub const fn with_wind_speed(mut self, wind_speed: Option<f64>) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    /// Set the wind direction
    #[must_use]
    pub const fn with_wind_direction(mut self, wind_direction: Option<f64>) -> Self {
        self.wind_direction = wind_direction;
        self
    }

    /// Set the pressure
    #[must_use]
    pub const fn with_pressure(mut self, pressure: Option<f64>) -> Self {
        self.pressure = pressure;
        self
    }

    /// Whether the record carries every required field
    ///
    /// A record is complete iff `city` and `description` are non-empty and
    /// `temperature` is a real number. Humidity, wind and pressure are optional.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.city.trim().is_empty()
            && !self.description.trim().is_empty()
            && self.temperature.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> WeatherRecord {
        WeatherRecord::new(
            "Paris",
            18.5,
            "clear sky",
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn new_record_is_unpersisted() {
        let record = sample();
        assert!(record.id.is_none());
        assert!(record.humidity.is_none());
        assert!(record.wind_speed.is_none());
    }

    #[test]
    fn builders_set_optional_fields() {
        let record = sample()
            .with_humidity(Some(60.0))
            .with_wind_speed(Some(3.5))
            .with_wind_direction(Some(270.0))
            .with_pressure(Some(1013.0))
            .with_id(7);

        assert_eq!(record.id, Some(7));
        assert_eq!(record.humidity, Some(60.0));
        assert_eq!(record.wind_speed, Some(3.5));
        assert_eq!(record.wind_direction, Some(270.0));
        assert_eq!(record.pressure, Some(1013.0));
    }

    #[test]
    fn complete_without_optional_fields() {
        assert!(sample().is_complete());
    }

    #[test]
    fn incomplete_without_description() {
        let mut record = sample();
        record.description = "  ".to_string();
        assert!(!record.is_complete());
    }

    #[test]
    fn incomplete_without_city() {
        let mut record = sample();
        record.city = String::new();
        assert!(!record.is_complete());
    }

    #[test]
    fn incomplete_with_nan_temperature() {
        let mut record = sample();
        record.temperature = f64::NAN;
        assert!(!record.is_complete());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let record = sample().with_wind_speed(Some(4.2)).with_id(1);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["city"], "Paris");
        assert_eq!(json["windSpeed"], 4.2);
        assert!(json["windDirection"].is_null());
        assert_eq!(json["timestamp"], "2024-06-01T12:00:00Z");
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "city": "Oslo",
            "temperature": -3.0,
            "description": "snow",
            "timestamp": "2024-01-10T08:30:00Z"
        }"#;
        let record: WeatherRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.city, "Oslo");
        assert!(record.id.is_none());
        assert!(record.pressure.is_none());
    }
}
