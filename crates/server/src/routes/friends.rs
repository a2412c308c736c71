use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use friendfinder::search;
use std::collections::HashMap;
use std::sync::Arc;

/// Query parameter carrying the search text
pub const QUERY_PARAM: &str = "q";

/// Search the record collection
///
/// `GET /api/friends?q=<text>` returns every record with a field containing
/// `q`, ignoring case. A missing `q` matches everything. Unknown parameters
/// are ignored; a repeated `q` keeps the last value.
///
/// # Response
///
/// ```json
/// { "results": [{ "name": "Alice", "city": "Reno" }], "count": 1, "query": "reno" }
/// ```
///
/// When the fault policy decides to fail, the response is a `500` with a
/// plain-text body `Request for '<q>' failed.` after the same random delay.
/// `<q>` is echoed as the client sent it, not lower-cased, so the message
/// names the query the user typed.
pub async fn search_friends(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ServerResult<Response> {
    let query = params.get(QUERY_PARAM).map(String::as_str);
    let response = search(state.records.records(), query);

    metrics::counter!("friends_search_requests_total").increment(1);
    metrics::histogram!("friends_search_matches").record(response.count as f64);
    tracing::debug!(query = ?query, count = response.count, "search completed");

    let decision = state.faults.decide();
    if decision.apply().await {
        metrics::counter!("friends_search_failures_injected_total").increment(1);
        tracing::warn!(
            query = ?query,
            delay_ms = decision.delay.as_millis() as u64,
            "injecting simulated failure"
        );
        return Err(ServerError::InjectedFailure {
            query: query.unwrap_or_default().to_string(),
        });
    }

    Ok(Json(response).into_response())
}
