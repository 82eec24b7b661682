//! Product storage layer.
//!
//! Provides SQLite-backed persistence for current product records.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

#[cfg(test)]
use mockall::automock;

use crate::error::{StockError, StockResult};
use crate::types::{Product, ProductDraft, ProductId};

/// Trait for product storage operations.
#[cfg_attr(test, automock)]
pub trait ProductStore: Send + Sync {
    /// Insert a new product with the deleted flag cleared; returns the stored record.
    fn create(&self, draft: &ProductDraft) -> StockResult<Product>;

    /// Point lookup by id.
    fn get(&self, id: ProductId) -> StockResult<Option<Product>>;

    /// All products with the deleted flag cleared.
    fn list_active(&self) -> StockResult<Vec<Product>>;

    /// All products with the deleted flag set.
    fn list_deleted(&self) -> StockResult<Vec<Product>>;

    /// Upsert by id; overwrites all mutable fields and the deleted flag.
    fn save(&self, product: &Product) -> StockResult<()>;
}

/// SQLite-backed product store.
pub struct SqliteProductStore {
    conn: Mutex<Connection>,
}

impl SqliteProductStore {
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
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                price TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                deleted INTEGER NOT NULL DEFAULT 0
            );

            -- Index for active/deleted listings
            CREATE INDEX IF NOT EXISTS idx_products_deleted
                ON products(deleted);
        "#,
        )?;
        Ok(())
    }

    fn row_to_product(row: &rusqlite::Row<'_>) -> StockResult<Product> {
        let id: ProductId = row.get(0)?;
        let name: String = row.get(1)?;
        let description: String = row.get(2)?;
        let price: String = row.get(3)?;
        let quantity: i64 = row.get(4)?;
        let deleted: i64 = row.get(5)?;

        Ok(Product {
            id,
            name,
            description,
            price: price
                .parse::<Decimal>()
                .map_err(|e| StockError::database(format!("invalid price in row {}: {}", id, e)))?,
            quantity,
            deleted: deleted != 0,
        })
    }

    fn list_by_flag(&self, deleted: bool) -> StockResult<Vec<Product>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"SELECT id, name, description, price, quantity, deleted
               FROM products
               WHERE deleted = ?1
               ORDER BY id ASC"#,
        )?;

        let results = stmt.query_map(params![deleted as i64], |row| Ok(Self::row_to_product(row)))?;

        results
            .map(|r| r.map_err(|e| e.into()).and_then(|inner| inner))
            .collect()
    }
}

impl ProductStore for SqliteProductStore {
    fn create(&self, draft: &ProductDraft) -> StockResult<Product> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"INSERT INTO products (name, description, price, quantity, deleted)
               VALUES (?1, ?2, ?3, ?4, 0)"#,
            params![
                draft.name,
                draft.description,
                draft.price.to_string(),
                draft.quantity,
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Product {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            quantity: draft.quantity,
            deleted: false,
        })
    }

    fn get(&self, id: ProductId) -> StockResult<Option<Product>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"SELECT id, name, description, price, quantity, deleted
               FROM products
               WHERE id = ?1"#,
        )?;

        stmt.query_row(params![id], |row| Ok(Self::row_to_product(row)))
            .optional()?
            .transpose()
    }

    fn list_active(&self) -> StockResult<Vec<Product>> {
        self.list_by_flag(false)
    }

    fn list_deleted(&self) -> StockResult<Vec<Product>> {
        self.list_by_flag(true)
    }

    fn save(&self, product: &Product) -> StockResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"INSERT INTO products (id, name, description, price, quantity, deleted)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)
               ON CONFLICT(id) DO UPDATE SET
                   name = excluded.name,
                   description = excluded.description,
                   price = excluded.price,
                   quantity = excluded.quantity,
                   deleted = excluded.deleted"#,
            params![
                product.id,
                product.name,
                product.description,
                product.price.to_string(),
                product.quantity,
                product.deleted as i64,
            ],
        )?;
        Ok(())
    }
}
