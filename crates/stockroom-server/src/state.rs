//! Server state management.

use std::sync::Arc;

use stockroom_core::config::StockroomConfig;
use stockroom_core::error::StockResult;
use stockroom_core::{Inventory, SqliteHistoryStore, SqliteProductStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Inventory>,
}

impl AppState {
    /// Create application state over an existing inventory.
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: Arc::new(inventory),
        }
    }

    /// Open the SQLite stores at the configured path and build the inventory.
    pub fn from_config(config: &StockroomConfig) -> StockResult<Self> {
        let products = Arc::new(SqliteProductStore::new(&config.db_path)?);
        let history = Arc::new(SqliteHistoryStore::new(&config.db_path)?);
        Ok(Self::new(Inventory::new(products, history)))
    }
}
