//! Per-route rate limiting middleware.
//!
//! Attached to each limited route with
//! `from_fn_with_state((state, endpoint), enforce_rate_limit)`. It runs
//! before any extractor, so a rejected request never reaches token
//! validation.

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use tokengate_auth::{Admission, AuthError, Endpoint};

use crate::error::ApiError;
use crate::extractors::client_key;
use crate::state::AppState;

/// Response header carrying the endpoint's ceiling.
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
/// Response header carrying requests left in the current window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Admits or rejects the request for `endpoint` under the caller's key.
pub async fn enforce_rate_limit(
    State((state, endpoint)): State<(AppState, Endpoint)>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.rate_limit.enabled {
        return Ok(next.run(request).await);
    }

    let key = client_key(
        request.headers(),
        request.extensions(),
        &state.config.rate_limit.trusted_proxies,
    );

    match state.rate_limiter.admit(&key, endpoint) {
        Admission::Admitted { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(LIMIT_HEADER, HeaderValue::from(endpoint.policy().limit));
            headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
            Ok(response)
        }
        Admission::Rejected { retry_after } => Err(AuthError::RateLimited { retry_after }.into()),
    }
}
