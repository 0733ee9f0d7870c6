//! Product handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use tokengate_entity::Product;

use crate::dto::request::ProductRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.product_service.list(&auth).await?))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_uuid(&id, "Product")?;
    Ok(Json(state.product_service.get(&auth, id).await?))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.product_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_uuid(&id, "Product")?;
    Ok(Json(state.product_service.update(&auth, id, req.into()).await?))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&id, "Product")?;
    state.product_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
