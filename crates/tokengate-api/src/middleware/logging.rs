//! Per-request access log.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

use crate::extractors::client_key;
use crate::state::AppState;

/// Emits one line per request with the caller key, route, status, and
/// latency. Server errors are logged at `warn`.
pub async fn request_logging(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let client = client_key(
        request.headers(),
        request.extensions(),
        &state.config.rate_limit.trusted_proxies,
    );
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(%method, %path, %client, status, elapsed_ms, "Request failed");
    } else {
        info!(%method, %path, %client, status, elapsed_ms, "Request served");
    }

    response
}
