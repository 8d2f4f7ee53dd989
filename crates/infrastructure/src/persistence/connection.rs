//! Database connection management
//!
//! Provides SQLite connection pooling via r2d2.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Failed to create database directory: {0}")]
    Directory(#[from] std::io::Error),
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Create a new connection pool
///
/// A file path gets its parent directories created first. `:memory:` yields
/// a single long-lived connection, since every in-memory connection is a
/// separate database.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the pool cannot open
/// a connection, or migrations fail.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Creating database connection pool");

    let builder = Pool::builder();
    let (manager, builder) = if config.is_in_memory() {
        (
            SqliteConnectionManager::memory(),
            builder.max_size(1).idle_timeout(None).max_lifetime(None),
        )
    } else {
        if let Some(parent) = Path::new(&config.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        (
            SqliteConnectionManager::file(&config.path),
            builder.max_size(config.max_connections.max(1)),
        )
    };

    let pool = builder.build(manager.with_init(initialize_connection))?;

    if config.run_migrations {
        let conn = pool.get()?;
        crate::persistence::migrations::run_migrations(&conn)?;
    }

    debug!("Database connection pool created successfully");
    Ok(pool)
}

/// Per-connection settings, applied to every connection the pool opens
fn initialize_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_in_memory_pool() {
        let pool = create_pool(&DatabaseConfig::in_memory());
        assert!(pool.is_ok());
    }

    #[test]
    fn in_memory_pool_is_capped_at_one_connection() {
        let config = DatabaseConfig {
            max_connections: 8,
            ..DatabaseConfig::in_memory()
        };
        let pool = create_pool(&config).unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn pool_connection_has_foreign_keys_enabled() {
        let pool = create_pool(&DatabaseConfig::in_memory()).unwrap();
        let conn = pool.get().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn file_pool_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("weather.db");
        let config = DatabaseConfig {
            path: path.to_string_lossy().into_owned(),
            max_connections: 2,
            run_migrations: true,
        };

        let pool = create_pool(&config).unwrap();
        assert!(path.exists());
        assert_eq!(pool.max_size(), 2);
    }

    #[test]
    fn skipping_migrations_leaves_schema_empty() {
        let config = DatabaseConfig {
            run_migrations: false,
            ..DatabaseConfig::in_memory()
        };
        let pool = create_pool(&config).unwrap();
        let conn = pool.get().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'weather_records'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0);
    }

    #[test]
    fn database_error_display() {
        let err = DatabaseError::Migration("v1 failed".to_string());
        assert!(err.to_string().contains("v1 failed"));
    }
}
