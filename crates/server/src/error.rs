use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Simulated failure chosen by the fault policy
    #[error("Request for '{query}' failed.")]
    InjectedFailure { query: String },

    #[error("Data error: {0}")]
    Data(#[from] friendfinder::DataError),

    #[error("Metrics are disabled")]
    MetricsDisabled,

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound | ServerError::MetricsDisabled => StatusCode::NOT_FOUND,
            ServerError::InjectedFailure { .. } | ServerError::Data(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::InjectedFailure { .. } => "INJECTED_FAILURE",
            ServerError::Data(_) => "DATA_ERROR",
            ServerError::MetricsDisabled => "METRICS_DISABLED",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        // Clients built against the search endpoint read the failure body as text.
        if let ServerError::InjectedFailure { .. } = self {
            return (
                status,
                [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                message,
            )
                .into_response();
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
