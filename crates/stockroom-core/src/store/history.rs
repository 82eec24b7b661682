//! History storage layer.
//!
//! Append-only persistence for product snapshots. There are no update or
//! delete statements for this table; records outlive soft deletion of the
//! product they reference.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

#[cfg(test)]
use mockall::automock;

use crate::error::{StockError, StockResult};
use crate::types::{HistoryId, ProductHistory, ProductId, Snapshot};

/// Trait for history storage operations.
#[cfg_attr(test, automock)]
pub trait HistoryStore: Send + Sync {
    /// Persist a snapshot; returns the stored record with its assigned id.
    fn append(&self, snapshot: &Snapshot) -> StockResult<ProductHistory>;

    /// Point lookup by snapshot id.
    fn get(&self, id: HistoryId) -> StockResult<Option<ProductHistory>>;

    /// All snapshots for a product, newest first.
    fn for_product(&self, product_id: ProductId) -> StockResult<Vec<ProductHistory>>;

    /// The most recent snapshot for a product, if any.
    fn latest(&self, product_id: ProductId) -> StockResult<Option<ProductHistory>>;
}

/// SQLite-backed history store.
pub struct SqliteHistoryStore {
    conn: Mutex<Connection>,
}

impl SqliteHistoryStore {
    /// Create a new store at the given path.
    pub fn new(path: impl AsRef<Path>) -> StockResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> StockResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StockResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS product_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                product_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                price TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                modified_at TEXT NOT NULL
            );

            -- Index for newest-first retrieval per product
            CREATE INDEX IF NOT EXISTS idx_history_product_time
                ON product_history(product_id, modified_at DESC, id DESC);
        "#,
        )?;
        Ok(())
    }

    fn row_to_history(row: &rusqlite::Row<'_>) -> StockResult<ProductHistory> {
        let id: HistoryId = row.get(0)?;
        let product_id: ProductId = row.get(1)?;
        let name: String = row.get(2)?;
        let description: String = row.get(3)?;
        let price: String = row.get(4)?;
        let quantity: i64 = row.get(5)?;
        let modified_at: String = row.get(6)?;

        Ok(ProductHistory {
            id,
            product_id,
            name,
            description,
            price: price
                .parse::<Decimal>()
                .map_err(|e| StockError::database(format!("invalid price in row {}: {}", id, e)))?,
            quantity,
            modified_at: DateTime::parse_from_rfc3339(&modified_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    StockError::database(format!("invalid timestamp in row {}: {}", id, e))
                })?,
        })
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn append(&self, snapshot: &Snapshot) -> StockResult<ProductHistory> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"INSERT INTO product_history
               (product_id, name, description, price, quantity, modified_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            params![
                snapshot.product_id,
                snapshot.name,
                snapshot.description,
                snapshot.price.to_string(),
                snapshot.quantity,
                snapshot.modified_at.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(ProductHistory {
            id,
            product_id: snapshot.product_id,
            name: snapshot.name.clone(),
            description: snapshot.description.clone(),
            price: snapshot.price,
            quantity: snapshot.quantity,
            modified_at: snapshot.modified_at,
        })
    }

    fn get(&self, id: HistoryId) -> StockResult<Option<ProductHistory>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"SELECT id, product_id, name, description, price, quantity, modified_at
               FROM product_history
               WHERE id = ?1"#,
        )?;

        stmt.query_row(params![id], |row| Ok(Self::row_to_history(row)))
            .optional()?
            .transpose()
    }

    fn for_product(&self, product_id: ProductId) -> StockResult<Vec<ProductHistory>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"SELECT id, product_id, name, description, price, quantity, modified_at
               FROM product_history
               WHERE product_id = ?1
               ORDER BY modified_at DESC, id DESC"#,
        )?;

        let results = stmt.query_map(params![product_id], |row| Ok(Self::row_to_history(row)))?;

        results
            .map(|r| r.map_err(|e| e.into()).and_then(|inner| inner))
            .collect()
    }

    fn latest(&self, product_id: ProductId) -> StockResult<Option<ProductHistory>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"SELECT id, product_id, name, description, price, quantity, modified_at
               FROM product_history
               WHERE product_id = ?1
               ORDER BY modified_at DESC, id DESC
               LIMIT 1"#,
        )?;

        stmt.query_row(params![product_id], |row| Ok(Self::row_to_history(row)))
            .optional()?
            .transpose()
    }
}
