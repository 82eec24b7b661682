//! stockroom-core - Core library for stockroom.
//!
//! This crate provides the domain types, stores, and the Inventory engine for
//! a product catalog with versioned history. Every mutation of a product's
//! field values snapshots the prior state into an append-only history table,
//! and products can be reverted to any recorded snapshot. Deletion is a soft
//! flag, orthogonal to content versions.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stockroom_core::{Inventory, SqliteHistoryStore, SqliteProductStore};
//!
//! let products = Arc::new(SqliteProductStore::new("stockroom.db")?);
//! let history = Arc::new(SqliteHistoryStore::new("stockroom.db")?);
//! let inventory = Inventory::new(products, history);
//!
//! let product = inventory.create(&draft)?;
//! inventory.update(product.id, &new_fields)?;
//! let reverted = inventory.revert_to_last_modified(product.id)?;
//! ```

pub mod config;
pub mod error;
pub mod inventory;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::StockroomConfig;
pub use error::{ErrorCode, StockError, StockResult};
pub use inventory::Inventory;
pub use store::{HistoryStore, ProductStore, SqliteHistoryStore, SqliteProductStore};
pub use types::{HistoryId, Product, ProductDraft, ProductHistory, ProductId, Snapshot};
