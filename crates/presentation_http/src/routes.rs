//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Weather API
        .route(
            "/api/weather",
            get(handlers::weather::get_weather_by_query),
        )
        .route(
            "/api/weather/{city}",
            get(handlers::weather::get_weather_by_path),
        )
        .route(
            "/api/weather/{city}/history",
            get(handlers::weather::get_weather_history)
                .delete(handlers::weather::delete_weather_history),
        )
        // Attach state
        .with_state(state)
}
