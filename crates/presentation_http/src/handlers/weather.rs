//! Weather handlers
//!
//! Thin wrappers over [`application::WeatherService`] that decode path and
//! query parameters and wrap results in [`ApiResponse`]. Extractor failures
//! are reported through [`ApiError`] so they carry the envelope too.

use application::DEFAULT_HISTORY_LIMIT;
use axum::{
    Json,
    extract::{FromRequestParts, Path, Query, State},
    http::request::Parts,
};
use domain::WeatherRecord;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, response::ApiResponse, state::AppState};

/// Query string for `GET /api/weather`
#[derive(Debug, Default, Deserialize, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct CityQuery {
    pub city: Option<String>,
}

/// `{city}` path segment
#[derive(Debug, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct CityPath {
    pub city: String,
}

/// Query string for `GET /api/weather/{city}/history`
///
/// `limit` stays a string so that malformed values fall back to the default
/// instead of rejecting the request.
#[derive(Debug, Default)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

impl HistoryQuery {
    /// Collect `limit` from raw query pairs; a repeated `limit` is ambiguous
    /// and treated as absent
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut values = pairs
            .iter()
            .filter(|(key, _)| key == "limit")
            .map(|(_, value)| value);

        let limit = match (values.next(), values.next()) {
            (Some(value), None) => Some(value.clone()),
            _ => None,
        };

        Self { limit }
    }

    /// Parsed limit: absent, non-numeric or negative values yield the default
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
    }
}

impl<S> FromRequestParts<S> for HistoryQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(Self::from_pairs(&pairs))
    }
}

async fn fetch_weather(
    state: &AppState,
    city: &str,
) -> Result<Json<ApiResponse<WeatherRecord>>, ApiError> {
    let record = state
        .weather_service
        .get_weather(city)
        .await
        .map_err(|e| ApiError::with_context("Failed to fetch weather data", e))?;

    Ok(Json(ApiResponse::success(
        "Weather data retrieved successfully",
        record,
    )))
}

/// `GET /api/weather?city=...`
#[instrument(skip(state))]
pub async fn get_weather_by_query(
    State(state): State<AppState>,
    query: CityQuery,
) -> Result<Json<ApiResponse<WeatherRecord>>, ApiError> {
    fetch_weather(&state, query.city.as_deref().unwrap_or_default()).await
}

/// `GET /api/weather/{city}`
#[instrument(skip(state))]
pub async fn get_weather_by_path(
    State(state): State<AppState>,
    path: CityPath,
) -> Result<Json<ApiResponse<WeatherRecord>>, ApiError> {
    fetch_weather(&state, &path.city).await
}

/// `GET /api/weather/{city}/history?limit=...`
#[instrument(skip(state))]
pub async fn get_weather_history(
    State(state): State<AppState>,
    path: CityPath,
    query: HistoryQuery,
) -> Result<Json<ApiResponse<Vec<WeatherRecord>>>, ApiError> {
    let records = state
        .weather_service
        .get_weather_history(&path.city, Some(query.limit()))
        .await
        .map_err(|e| ApiError::with_context("Failed to fetch weather history", e))?;

    Ok(Json(ApiResponse::success(
        "Weather history retrieved successfully",
        records,
    )))
}

/// `DELETE /api/weather/{city}/history`
///
/// `data` is the number of records removed.
#[instrument(skip(state))]
pub async fn delete_weather_history(
    State(state): State<AppState>,
    path: CityPath,
) -> Result<Json<ApiResponse<u64>>, ApiError> {
    let deleted = state
        .weather_service
        .delete_weather_history(&path.city)
        .await
        .map_err(|e| ApiError::with_context("Failed to delete weather history", e))?;

    Ok(Json(ApiResponse::success(
        format!("Deleted {deleted} weather record(s) for {}", path.city),
        deleted,
    )))
}
