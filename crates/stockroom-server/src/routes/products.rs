//! Product CRUD endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;
use stockroom_core::{Product, ProductDraft, ProductId};

/// Response for product listings.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub results: Vec<Product>,
}

/// Create a new product.
/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state.inventory.create(&draft)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List all active products.
/// GET /products
pub async fn list_products(
    State(state): State<AppState>,
) -> ApiResult<Json<ProductListResponse>> {
    let results = state.inventory.list_active()?;
    Ok(Json(ProductListResponse { results }))
}

/// List all soft-deleted products.
/// GET /products/deleted
pub async fn list_deleted_products(
    State(state): State<AppState>,
) -> ApiResult<Json<ProductListResponse>> {
    let results = state.inventory.list_deleted()?;
    Ok(Json(ProductListResponse { results }))
}

/// Get a specific product by ID.
/// GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    let product = state.inventory.get(id)?;
    Ok(Json(product))
}

/// Update a product, snapshotting its prior state.
/// PUT /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(draft): Json<ProductDraft>,
) -> ApiResult<Json<Product>> {
    let product = state.inventory.update(id, &draft)?;
    Ok(Json(product))
}

/// Soft-delete a product.
/// DELETE /products/:id
pub async fn soft_delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<serde_json::Value>> {
    state.inventory.soft_delete(id)?;
    Ok(Json(serde_json::json!({
        "message": "Product deleted successfully"
    })))
}

/// Restore a soft-deleted product.
/// PUT /products/restore/:id
pub async fn restore_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    let product = state.inventory.restore(id)?;
    Ok(Json(product))
}
