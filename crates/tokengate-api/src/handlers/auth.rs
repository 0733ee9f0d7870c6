//! Auth handlers: register, login, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, MeResponse, UserMessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserMessageResponse>), ApiError> {
    let user = state.auth_service.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserMessageResponse {
            message: "User created successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state.auth_service.login(&req.email, &req.password).await?;
    let claims = outcome.token.claims;

    Ok(Json(LoginResponse {
        access_token: outcome.token.access_token,
        token_type: "bearer".to_string(),
        expires_in: outcome.token.expires_in,
        user_id: outcome.user.id,
        role: claims.role,
        scopes: claims.scopes,
    }))
}

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = state.auth_service.current_user(&auth).await?;

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        username: user.username,
        role: auth.role(),
        scopes: auth.scopes().to_vec(),
    }))
}
