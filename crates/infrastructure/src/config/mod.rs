//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings and log format
//! - `database`: SQLite database settings
//! - `integrations`: OpenWeatherMap provider settings
//!
//! Values are layered: built-in defaults, then an optional `config.toml` in
//! the working directory, then `WEATHERLOG_*` environment variables (nested
//! keys use `__`, e.g. `WEATHERLOG_SERVER__PORT=8080`). The provider key also
//! falls back to `OPENWEATHER_API_KEY`.

mod database;
mod integrations;
mod server;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use database::{DatabaseConfig, IN_MEMORY_PATH};
pub use integrations::{OPENWEATHER_API_KEY_ENV, WeatherAppConfig};
pub use server::ServerConfig;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "WEATHERLOG";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(config::File::with_name("config").required(false))
    }

    /// Load configuration from the given file source and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load_from<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.path", "weatherlog.db")?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., WEATHERLOG_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.weather.apply_env_fallback();

        if config.weather.has_api_key() {
            debug!("Weather API key configured");
        } else {
            warn!(
                "No weather API key configured; set {ENV_PREFIX}_WEATHER__API_KEY or {OPENWEATHER_API_KEY_ENV}"
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.log_format, "text");
        assert_eq!(config.server.shutdown_timeout_secs, 30);
        assert_eq!(config.database.path, "weatherlog.db");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.run_migrations);
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn app_config_deserialization_fills_defaults() {
        let json = r#"{"server":{"port":8080}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.weather.timeout_secs, 10);
    }

    #[test]
    fn app_config_serialization_omits_secrets() {
        let mut config = AppConfig::default();
        config.weather.api_key = Some(secrecy::SecretString::from("hidden"));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("server"));
        assert!(json.contains("database"));
        assert!(json.contains("weather"));
        assert!(!json.contains("hidden"));
    }

    #[test]
    fn load_from_toml_source() {
        let toml = r#"
            [server]
            port = 9090
            log_format = "json"
            allowed_origins = ["http://localhost:5173"]

            [database]
            path = "/tmp/weather.db"
            max_connections = 2

            [weather]
            base_url = "http://localhost:8081"
            timeout_secs = 4
        "#;

        let config = AppConfig::load_from(File::from_str(toml, FileFormat::Toml)).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.log_format, "json");
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.database.path, "/tmp/weather.db");
        assert_eq!(config.database.max_connections, 2);
        assert!(config.database.run_migrations);
        assert_eq!(config.weather.base_url, "http://localhost:8081");
        assert_eq!(config.weather.timeout_secs, 4);
    }

    #[test]
    fn load_from_empty_source_uses_defaults() {
        let config = AppConfig::load_from(File::from_str("", FileFormat::Toml)).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, "weatherlog.db");
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            ..Default::default()
        };
        assert_eq!(server.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn in_memory_database_config() {
        let config = DatabaseConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
        assert!(!DatabaseConfig::default().is_in_memory());
    }
}
