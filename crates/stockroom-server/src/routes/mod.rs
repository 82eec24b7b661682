//! Route definitions for the REST API.

mod health;
mod history;
mod products;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Product operations
        .route("/products", post(products::create_product))
        .route("/products", get(products::list_products))
        .route("/products/deleted", get(products::list_deleted_products))
        .route("/products/:id", get(products::get_product))
        .route("/products/:id", put(products::update_product))
        .route("/products/:id", delete(products::soft_delete_product))
        .route("/products/restore/:id", put(products::restore_product))
        // Versioning
        .route("/products/:id/history", get(history::get_product_history))
        .route("/products/:id/revert", put(history::revert_to_last_modified))
        .route(
            "/products/:id/revert/:history_id",
            put(history::revert_to_version),
        )
        // Attach state
        .with_state(state)
}

pub use health::*;
pub use history::*;
pub use products::*;
