//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the SQLite history
//! store, the OpenWeatherMap gateway adapter, configuration loading and
//! logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DatabaseConfig, ServerConfig, WeatherAppConfig};
pub use persistence::{ConnectionPool, DatabaseError, SqliteWeatherHistoryStore, create_pool};
pub use telemetry::{LogFormat, TelemetryError, init_tracing};
