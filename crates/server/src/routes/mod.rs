//! API route handlers
//!
//! - `friends`: the search endpoint
//! - `health`: liveness, readiness, and metrics

pub mod friends;
pub mod health;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /).
///
/// # Response
///
/// ```json
/// {
///   "name": "friendfinder",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "friendfinder",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/friends?q=<text>",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
