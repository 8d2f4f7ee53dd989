//! Weatherlog HTTP presentation layer
//!
//! This crate provides the HTTP API: current-weather lookups, stored history
//! and health probes, all answered in a uniform JSON envelope.

pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use response::ApiResponse;
pub use routes::create_router;
pub use state::AppState;
