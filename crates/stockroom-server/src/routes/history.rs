//! Versioning endpoints: history listing and reverts.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;
use stockroom_core::{HistoryId, Product, ProductHistory, ProductId};

/// Response for product history.
#[derive(Debug, Serialize)]
pub struct ProductHistoryResponse {
    pub history: Vec<ProductHistory>,
}

/// Get a product's modification history, newest first.
/// GET /products/:id/history
pub async fn get_product_history(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<ProductHistoryResponse>> {
    let history = state.inventory.history(id)?;
    Ok(Json(ProductHistoryResponse { history }))
}

/// Revert a product to its most recent recorded version.
/// PUT /products/:id/revert
pub async fn revert_to_last_modified(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    let product = state.inventory.revert_to_last_modified(id)?;
    Ok(Json(product))
}

/// Revert a product to a specific historical version.
/// PUT /products/:id/revert/:history_id
pub async fn revert_to_version(
    State(state): State<AppState>,
    Path((id, history_id)): Path<(ProductId, HistoryId)>,
) -> ApiResult<Json<Product>> {
    let product = state.inventory.revert_to_version(id, history_id)?;
    Ok(Json(product))
}
