//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, validates it, and injects a request context.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use tokengate_auth::AuthError;
use tokengate_service::RequestContext;

use super::client::client_key;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Returns the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively; an empty token is rejected.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| {
                tracing::debug!(reason = AuthError::Unauthenticated.reason(), "No bearer credential");
                AuthError::Unauthenticated
            })?;

        let claims = state.tokens.validate(token)?;

        let client = client_key(
            &parts.headers,
            &parts.extensions,
            &state.config.rate_limit.trusted_proxies,
        );
        let ctx = RequestContext::new(claims, client);

        Ok(AuthUser(ctx))
    }
}
