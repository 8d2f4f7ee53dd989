//! Database (SQLite) configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Path understood as "private in-memory database"
pub const IN_MEMORY_PATH: &str = ":memory:";

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of concurrent database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Whether to run pending migrations on startup (default: true)
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Single-connection in-memory database, migrated on creation
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// capped at one connection.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY_PATH.to_string(),
            max_connections: 1,
            run_migrations: true,
        }
    }

    /// Whether this config points at an in-memory database
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }
}

fn default_db_path() -> String {
    "weatherlog.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}
