//! City name value object
//!
//! A city name as typed by a caller, guaranteed to contain at least one
//! non-whitespace character.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::CityName;
//!
//! let city = CityName::parse("  Paris ").expect("valid city");
//! assert_eq!(city.as_str(), "Paris");
//!
//! assert!(CityName::parse("   ").is_err());
//! ```

use std::fmt;

use serde::Serialize;

use crate::errors::DomainError;

/// Message returned when a city name is missing or blank
pub const CITY_NAME_REQUIRED: &str = "City name is required";

/// Trimmed, non-empty city name used to query the upstream provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CityName(String);

impl CityName {
    /// Validate and trim a raw city name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` with [`CITY_NAME_REQUIRED`] if the
    /// input is empty or whitespace only.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(CITY_NAME_REQUIRED));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the city name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
