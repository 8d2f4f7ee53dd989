//! SQLite-based weather history persistence

use std::sync::Arc;

use application::{error::ApplicationError, ports::WeatherHistoryPort};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::WeatherRecord;
use rusqlite::{Row, params, types::Type};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based weather history store
#[derive(Debug, Clone)]
pub struct SqliteWeatherHistoryStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteWeatherHistoryStore {
    /// Create a new SQLite weather history store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn storage_error(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Storage(e.to_string())
}

#[async_trait]
impl WeatherHistoryPort for SqliteWeatherHistoryStore {
    #[instrument(skip(self, record), fields(city = %record.city))]
    async fn insert(&self, record: &WeatherRecord) -> Result<WeatherRecord, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let record = record.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_error)?;

            conn.execute(
                "INSERT INTO weather_records (
                    city, temperature, description, humidity,
                    wind_speed, wind_direction, pressure, timestamp
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.city,
                    record.temperature,
                    record.description,
                    record.humidity,
                    record.wind_speed,
                    record.wind_direction,
                    record.pressure,
                    timestamp_to_sql(&record.timestamp),
                ],
            )
            .map_err(storage_error)?;

            let id = conn.last_insert_rowid();
            debug!(id, "Saved weather record");
            Ok(record.with_id(id))
        })
        .await
        .map_err(storage_error)?
    }

    #[instrument(skip(self))]
    async fn find_by_city(
        &self,
        city: &str,
        limit: usize,
    ) -> Result<Vec<WeatherRecord>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let city = city.to_string();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_error)?;

            let mut stmt = conn
                .prepare(
                    "SELECT id, city, temperature, description, humidity,
                        wind_speed, wind_direction, pressure, timestamp
                     FROM weather_records
                     WHERE city = ?1
                     ORDER BY timestamp DESC, id DESC
                     LIMIT ?2",
                )
                .map_err(storage_error)?;

            let records = stmt
                .query_map(params![city, limit], row_to_record)
                .map_err(storage_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(storage_error)?;

            debug!(count = records.len(), "Loaded weather records");
            Ok(records)
        })
        .await
        .map_err(storage_error)?
    }

    #[instrument(skip(self))]
    async fn delete_by_city(&self, city: &str) -> Result<u64, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let city = city.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_error)?;

            let deleted = conn
                .execute("DELETE FROM weather_records WHERE city = ?1", [&city])
                .map_err(storage_error)?;

            debug!(deleted, "Deleted weather records");
            Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
        })
        .await
        .map_err(storage_error)?
    }

    async fn ping(&self) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_error)?;
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map_err(storage_error)?;
            Ok(())
        })
        .await
        .map_err(storage_error)?
    }
}

/// Fixed-width UTC text (nanosecond precision, `Z` suffix) so that string
/// ordering in SQL equals chronological ordering
fn timestamp_to_sql(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Convert a database row to a `WeatherRecord`
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<WeatherRecord> {
    let timestamp_str: String = row.get(8)?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e)))?;

    Ok(WeatherRecord {
        id: Some(row.get(0)?),
        city: row.get(1)?,
        temperature: row.get(2)?,
        description: row.get(3)?,
        humidity: row.get(4)?,
        wind_speed: row.get(5)?,
        wind_direction: row.get(6)?,
        pressure: row.get(7)?,
        timestamp,
    })
}
