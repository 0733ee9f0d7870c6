//! Admin handlers: user listing, deletion, elevation.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::response::{UserMessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_uuid};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.admin_user_service.list_users(&auth).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&id, "User")?;
    state.admin_user_service.delete_user(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/elevate/{id}
pub async fn elevate_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserMessageResponse>, ApiError> {
    let id = parse_uuid(&id, "User")?;
    let user = state.admin_user_service.elevate(&auth, id).await?;

    Ok(Json(UserMessageResponse {
        message: "User elevated to admin".to_string(),
        user_id: user.id,
    }))
}
