//! Weatherlog HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::WeatherService;
use infrastructure::{
    AppConfig, LogFormat, SqliteWeatherHistoryStore, WeatherAdapter, create_pool, init_tracing,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal, sync::watch};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

const DEFAULT_LOG_FILTER: &str = "weatherlog_server=debug,presentation_http=debug,application=debug,infrastructure=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration is loaded before logging so the format can be honored;
    // a load failure is reported once the subscriber is up.
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let parsed_format = config.server.log_format.parse::<LogFormat>();
    init_tracing(
        parsed_format.clone().unwrap_or_default(),
        DEFAULT_LOG_FILTER,
    )?;

    info!("Weatherlog v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }
    if let Err(e) = parsed_format {
        warn!("{}, falling back to text", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        weather_api = %config.weather.base_url,
        "Configuration loaded"
    );

    // Initialize persistence
    let pool = create_pool(&config.database).context("Failed to initialize database")?;
    let history = SqliteWeatherHistoryStore::new(Arc::new(pool));

    // Initialize weather gateway
    let gateway = WeatherAdapter::with_config(config.weather.to_client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {e}"))?;

    let weather_service = WeatherService::new(Arc::new(gateway), Arc::new(history));
    let state = AppState::new(weather_service);

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::DELETE])
            .allow_headers(Any)
    };

    let app = app.layer(TraceLayer::new_for_http()).layer(cors_layer);

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
        })
        .into_future();
    let signalled = async move {
        shutdown_signal().await;
        info!("Waiting up to {:?} for connections to close...", shutdown_timeout);
        let _ = shutdown_tx.send(true);
    };

    if run_with_drain_timeout(server, signalled, shutdown_timeout).await? {
        info!("Server shutdown complete");
    } else {
        warn!(
            "Connections still open after {:?}, shutting down anyway",
            shutdown_timeout
        );
    }

    Ok(())
}

/// Drive `server` to completion, allowing at most `timeout` for it to drain
/// once `shutdown` resolves
///
/// Returns `false` when the drain was cut short.
async fn run_with_drain_timeout<F>(
    server: F,
    shutdown: impl Future<Output = ()>,
    timeout: Duration,
) -> anyhow::Result<bool>
where
    F: Future<Output = std::io::Result<()>> + Send + 'static,
{
    let mut server = tokio::spawn(server);

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(true);
        }
        () = shutdown => {}
    }

    if let Ok(result) = tokio::time::timeout(timeout, &mut server).await {
        result??;
        Ok(true)
    } else {
        server.abort();
        Ok(false)
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAIN: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn drain_completes_within_timeout() {
        let (tx, mut rx) = watch::channel(false);
        let server = async move {
            let _ = rx.wait_for(|stopping| *stopping).await;
            Ok(())
        };
        let shutdown = async move {
            let _ = tx.send(true);
        };

        assert!(run_with_drain_timeout(server, shutdown, DRAIN).await.unwrap());
    }

    #[tokio::test]
    async fn drain_is_cut_short_after_timeout() {
        let server = std::future::pending::<std::io::Result<()>>();
        let started = tokio::time::Instant::now();

        let drained = run_with_drain_timeout(server, async {}, DRAIN).await.unwrap();

        assert!(!drained);
        assert!(started.elapsed() >= DRAIN);
    }

    #[tokio::test]
    async fn server_error_before_shutdown_is_returned() {
        let server = async { Err(std::io::Error::other("accept failed")) };

        let result =
            run_with_drain_timeout(server, std::future::pending::<()>(), DRAIN).await;

        assert!(result.unwrap_err().to_string().contains("accept failed"));
    }
}
