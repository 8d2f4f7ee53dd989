//! Persistence module
//!
//! SQLite-based storage for the weather observation log.

pub mod connection;
pub mod migrations;
pub mod weather_history_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use weather_history_store::SqliteWeatherHistoryStore;
