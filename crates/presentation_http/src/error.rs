//! API error handling
//!
//! Converts application errors into the response envelope. Caller mistakes
//! map to 400; every other failure (provider, configuration, storage) maps
//! to 500 with the error's client-facing text in `error`.

use application::ApplicationError;
use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::ApiResponse;

/// Envelope message used for every validation failure
pub const INVALID_REQUEST: &str = "Invalid request";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input failed validation
    #[error("{message}: {error}")]
    BadRequest { message: String, error: String },

    /// Any other failure while serving the request
    #[error("{message}: {error}")]
    Internal { message: String, error: String },
}

impl ApiError {
    /// Wrap an application error, using `context` as the envelope message for
    /// non-validation failures
    pub fn with_context(context: &str, err: ApplicationError) -> Self {
        if err.is_validation() {
            Self::BadRequest {
                message: INVALID_REQUEST.to_string(),
                error: err.to_string(),
            }
        } else {
            error!(kind = err.kind(), error = %err, "{context}");
            Self::Internal {
                message: context.to_string(),
                error: err.to_string(),
            }
        }
    }

    /// Request could not be decoded by an extractor
    fn rejected(error: String) -> Self {
        Self::BadRequest {
            message: INVALID_REQUEST.to_string(),
            error,
        }
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, error) = match self {
            Self::BadRequest { message, error } => {
                warn!(error = %error, "Rejected invalid request");
                (message, error)
            },
            Self::Internal { message, error } => (message, error),
        };

        let body = ApiResponse::<Value>::failure(message, Some(error));
        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::rejected(rejection.body_text())
    }
}
