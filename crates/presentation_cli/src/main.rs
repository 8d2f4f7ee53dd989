//! Weatherlog CLI
//!
//! Command-line interface for querying a running server and for
//! administering the history database directly.

#![allow(clippy::print_stdout)]

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use application::WeatherService;
use clap::{Parser, Subcommand};
use infrastructure::{
    AppConfig, DatabaseConfig, LogFormat, SqliteWeatherHistoryStore, WeatherAdapter, create_pool,
    init_tracing,
};
use serde_json::Value;
use tracing::debug;

/// Weatherlog CLI
#[derive(Parser)]
#[command(name = "weatherlog-cli")]
#[command(author, version, about = "Weatherlog weather history CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and record current weather for a city
    Weather {
        /// City name
        city: String,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Show stored observations for a city, most recent first
    History {
        /// City name (matched exactly)
        city: String,

        /// Maximum number of records
        #[arg(short, long)]
        limit: Option<usize>,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Delete every stored observation for a city
    ///
    /// Works directly against the database; the server does not need to be running.
    /// Example: weatherlog-cli purge Paris --database ./weatherlog.db
    Purge {
        /// City name (matched exactly)
        city: String,

        /// Path to the database (defaults to the configured database path)
        #[arg(short, long, env = "WEATHERLOG_DATABASE__PATH")]
        database: Option<PathBuf>,
    },

    /// Check server health (used by Docker healthcheck)
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL, tolerating a trailing slash on the base
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Append one path segment, percent-encoding it
fn city_url(base_url: &str, city: &str, suffix: &str) -> anyhow::Result<String> {
    let mut url = reqwest::Url::parse(&endpoint_url(base_url, "/api/weather"))?;
    url.path_segments_mut()
        .map_err(|()| anyhow::anyhow!("Server URL cannot be a base: {base_url}"))?
        .push(city);
    Ok(format!("{url}{suffix}"))
}

/// Print an envelope, returning whether it reports success
fn print_envelope(body: &Value) -> anyhow::Result<bool> {
    let success = body.get("success").and_then(Value::as_bool) == Some(true);
    let message = body.get("message").and_then(Value::as_str).unwrap_or("");

    if success {
        println!("✅ {message}");
        if let Some(data) = body.get("data") {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    } else {
        let error = body.get("error").and_then(Value::as_str).unwrap_or("");
        println!("❌ {message}: {error}");
    }

    Ok(success)
}

/// Resolve the database to purge
///
/// An explicit path wins and skips configuration entirely. Otherwise the
/// configured database is used, and a configuration that fails to load is an
/// error rather than a silent fall back to the default path.
fn purge_database_config<E>(
    database: Option<PathBuf>,
    load: impl FnOnce() -> Result<AppConfig, E>,
) -> anyhow::Result<DatabaseConfig>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match database {
        Some(path) => Ok(DatabaseConfig {
            path: path.to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        }),
        None => {
            let config = load().context("Failed to load configuration for purge")?;
            Ok(config.database)
        },
    }
}

/// Delete history for `city` directly through the service layer
async fn purge(city: &str, config: &DatabaseConfig) -> anyhow::Result<u64> {
    let pool = create_pool(config)?;
    let history = SqliteWeatherHistoryStore::new(Arc::new(pool));
    // The gateway is never contacted when deleting
    let gateway = WeatherAdapter::new().map_err(|e| anyhow::anyhow!("{e}"))?;
    let service = WeatherService::new(Arc::new(gateway), Arc::new(history));

    Ok(service.delete_weather_history(city).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(LogFormat::Text, log_filter_from_verbosity(cli.verbose))?;

    let client = reqwest::Client::new();

    match cli.command {
        Commands::Weather { city, url } => {
            let endpoint = city_url(&url, &city, "")?;
            debug!(%endpoint, "Fetching current weather");

            let body = client.get(endpoint).send().await?.json::<Value>().await?;
            if !print_envelope(&body)? {
                std::process::exit(1);
            }
        },

        Commands::History { city, limit, url } => {
            let endpoint = city_url(&url, &city, "/history")?;
            debug!(%endpoint, ?limit, "Fetching weather history");

            let mut request = client.get(endpoint);
            if let Some(limit) = limit {
                request = request.query(&[("limit", limit)]);
            }

            let body = request.send().await?.json::<Value>().await?;
            if !print_envelope(&body)? {
                std::process::exit(1);
            }
        },

        Commands::Purge { city, database } => {
            let config = purge_database_config(database, AppConfig::load)?;
            println!("🗑️  Purging history for {city} from {}", config.path);

            let deleted = purge(&city, &config).await?;
            println!("✅ Deleted {deleted} record(s)");
        },

        Commands::Health { url } => {
            match client.get(endpoint_url(&url, "/ready")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("✅ Healthy");
                    std::process::exit(0);
                },
                Ok(resp) => {
                    println!("❌ Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("❌ Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
