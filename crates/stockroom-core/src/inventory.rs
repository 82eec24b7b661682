//! Core Inventory implementation.
//!
//! The versioning engine over the product and history stores. Every operation
//! that overwrites a product's field values (update, revert) first appends a
//! snapshot of the pre-mutation state to history. Soft delete and restore flip
//! the deleted flag only and never touch history. All validation happens before
//! the first write, so a failed operation leaves both stores untouched.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{StockError, StockResult};
use crate::store::{HistoryStore, ProductStore};
use crate::types::{HistoryId, Product, ProductDraft, ProductHistory, ProductId, Snapshot};

/// Main Inventory struct - versioning and soft delete over the product store.
pub struct Inventory {
    products: Arc<dyn ProductStore>,
    history: Arc<dyn HistoryStore>,
}

impl Inventory {
    /// Create a new Inventory over the given stores.
    pub fn new(products: Arc<dyn ProductStore>, history: Arc<dyn HistoryStore>) -> Self {
        Self { products, history }
    }

    fn validate(draft: &ProductDraft) -> StockResult<()> {
        if draft.name.trim().is_empty() {
            return Err(StockError::validation("product name must not be empty"));
        }
        if draft.price < Decimal::ZERO {
            return Err(StockError::validation(format!(
                "price must be non-negative, got {}",
                draft.price
            )));
        }
        Ok(())
    }

    /// Create a product. The deleted flag starts cleared.
    pub fn create(&self, draft: &ProductDraft) -> StockResult<Product> {
        Self::validate(draft)?;
        let product = self.products.create(draft)?;
        info!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Fetch a product by id.
    pub fn get(&self, id: ProductId) -> StockResult<Product> {
        self.products
            .get(id)?
            .ok_or_else(|| StockError::not_found(id))
    }

    /// All products not marked deleted.
    pub fn list_active(&self) -> StockResult<Vec<Product>> {
        self.products.list_active()
    }

    /// All soft-deleted products.
    pub fn list_deleted(&self) -> StockResult<Vec<Product>> {
        self.products.list_deleted()
    }

    /// Overwrite a product's fields, snapshotting the prior state first.
    ///
    /// Exactly one history entry is appended per successful update, and it
    /// always reflects the pre-update state, never the post-update state.
    pub fn update(&self, id: ProductId, draft: &ProductDraft) -> StockResult<Product> {
        Self::validate(draft)?;
        let mut product = self.get(id)?;

        self.history.append(&Snapshot::of(&product))?;

        product.apply(draft);
        self.products.save(&product)?;
        debug!(product_id = id, "Product updated");
        Ok(product)
    }

    /// Revert a product to its most recent recorded snapshot.
    ///
    /// The target snapshot is read before the pre-revert state is appended, so
    /// the operation restores the last recorded version rather than the state
    /// it is about to write. One history entry capturing the pre-revert state
    /// is still appended.
    pub fn revert_to_last_modified(&self, id: ProductId) -> StockResult<Product> {
        let mut product = self.get(id)?;

        let last = self
            .history
            .latest(id)?
            .ok_or_else(|| StockError::no_history(id))?;

        self.history.append(&Snapshot::of(&product))?;

        last.apply_to(&mut product);
        self.products.save(&product)?;
        info!(
            product_id = id,
            history_id = last.id,
            "Product reverted to last modified version"
        );
        Ok(product)
    }

    /// Revert a product to a specific recorded snapshot.
    ///
    /// The snapshot must belong to the product being reverted; ownership is
    /// checked before anything is written.
    pub fn revert_to_version(&self, id: ProductId, history_id: HistoryId) -> StockResult<Product> {
        let mut product = self.get(id)?;

        let record = self
            .history
            .get(history_id)?
            .ok_or_else(|| StockError::history_not_found(history_id))?;
        if record.product_id != id {
            return Err(StockError::mismatch(history_id, id));
        }

        self.history.append(&Snapshot::of(&product))?;

        record.apply_to(&mut product);
        self.products.save(&product)?;
        info!(product_id = id, history_id, "Product reverted to version");
        Ok(product)
    }

    /// Mark a product deleted without removing it. No history entry is written.
    pub fn soft_delete(&self, id: ProductId) -> StockResult<Product> {
        let mut product = self.get(id)?;
        product.deleted = true;
        self.products.save(&product)?;
        info!(product_id = id, "Product soft-deleted");
        Ok(product)
    }

    /// Clear the deleted flag on a soft-deleted product.
    ///
    /// Restoring a product that is not deleted is an invalid-state error.
    pub fn restore(&self, id: ProductId) -> StockResult<Product> {
        let mut product = self.get(id)?;
        if !product.deleted {
            return Err(StockError::invalid_state(format!(
                "product {} is not deleted",
                id
            )));
        }
        product.deleted = false;
        self.products.save(&product)?;
        info!(product_id = id, "Product restored");
        Ok(product)
    }

    /// All snapshots for a product, newest first. Empty if none recorded.
    pub fn history(&self, product_id: ProductId) -> StockResult<Vec<ProductHistory>> {
        self.history.for_product(product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        MockHistoryStore, MockProductStore, SqliteHistoryStore, SqliteProductStore,
    };
    use chrono::Utc;

    fn inventory() -> Inventory {
        Inventory::new(
            Arc::new(SqliteProductStore::in_memory().unwrap()),
            Arc::new(SqliteHistoryStore::in_memory().unwrap()),
        )
    }

    fn draft(name: &str, price: i64, quantity: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: format!("{} description", name),
            price: Decimal::from(price),
            quantity,
        }
    }

    #[test]
    fn test_create_then_get() {
        let inventory = inventory();

        let created = inventory.create(&draft("Widget", 10, 5)).unwrap();
        assert!(!created.deleted);
        assert_eq!(created.name, "Widget");
        assert_eq!(created.price, Decimal::from(10));

        let fetched = inventory.get(created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let inventory = inventory();
        let err = inventory.create(&draft("Widget", -1, 5)).unwrap_err();
        assert!(matches!(err, StockError::Validation { .. }));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let inventory = inventory();
        let err = inventory.create(&draft("  ", 1, 1)).unwrap_err();
        assert!(matches!(err, StockError::Validation { .. }));
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let inventory = inventory();
        let err = inventory.get(42).unwrap_err();
        assert!(matches!(err, StockError::NotFound { .. }));
    }

    #[test]
    fn test_update_snapshots_prior_state() {
        let inventory = inventory();
        let created = inventory.create(&draft("Widget", 10, 5)).unwrap();

        let updated = inventory.update(created.id, &draft("Widget-2", 12, 5)).unwrap();
        assert_eq!(updated.name, "Widget-2");
        assert_eq!(updated.price, Decimal::from(12));

        let history = inventory.history(created.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].name, "Widget");
        assert_eq!(history[0].price, Decimal::from(10));
        assert_eq!(history[0].product_id, created.id);
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let inventory = inventory();
        let err = inventory.update(42, &draft("Widget", 10, 5)).unwrap_err();
        assert!(matches!(err, StockError::NotFound { .. }));
    }

    #[test]
    fn test_soft_delete_and_restore_flow() {
        let inventory = inventory();
        let created = inventory.create(&draft("Widget", 10, 5)).unwrap();

        inventory.soft_delete(created.id).unwrap();
        assert!(inventory.list_active().unwrap().is_empty());
        assert_eq!(inventory.list_deleted().unwrap().len(), 1);

        inventory.restore(created.id).unwrap();
        assert_eq!(inventory.list_active().unwrap().len(), 1);
        assert!(inventory.list_deleted().unwrap().is_empty());
    }

    #[test]
    fn test_flag_changes_write_no_history() {
        let inventory = inventory();
        let created = inventory.create(&draft("Widget", 10, 5)).unwrap();

        inventory.soft_delete(created.id).unwrap();
        inventory.restore(created.id).unwrap();

        assert!(inventory.history(created.id).unwrap().is_empty());
    }

    #[test]
    fn test_restore_non_deleted_is_invalid_state() {
        let inventory = inventory();
        let created = inventory.create(&draft("Widget", 10, 5)).unwrap();

        let err = inventory.restore(created.id).unwrap_err();
        assert!(matches!(err, StockError::InvalidState { .. }));

        // Nothing mutated.
        assert_eq!(inventory.get(created.id).unwrap(), created);
    }

    #[test]
    fn test_revert_to_version() {
        let inventory = inventory();
        let created = inventory.create(&draft("Widget", 10, 5)).unwrap();
        inventory.update(created.id, &draft("Widget-2", 12, 5)).unwrap();
        inventory.update(created.id, &draft("Widget-3", 15, 3)).unwrap();

        let history = inventory.history(created.id).unwrap();
        assert_eq!(history.len(), 2);
        // Newest first: the Widget-2 snapshot, then the original Widget.
        assert_eq!(history[0].name, "Widget-2");
        assert_eq!(history[1].name, "Widget");

        let original_id = history[1].id;
        let reverted = inventory.revert_to_version(created.id, original_id).unwrap();
        assert_eq!(reverted.name, "Widget");
        assert_eq!(reverted.price, Decimal::from(10));
        assert_eq!(reverted.quantity, 5);

        // The pre-revert state was snapshotted.
        let history = inventory.history(created.id).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].name, "Widget-3");
    }

    #[test]
    fn test_revert_to_version_mismatch() {
        let inventory = inventory();
        let first = inventory.create(&draft("First", 1, 1)).unwrap();
        let second = inventory.create(&draft("Second", 2, 2)).unwrap();
        inventory.update(first.id, &draft("First-2", 3, 1)).unwrap();

        let foreign = inventory.history(first.id).unwrap()[0].id;
        let err = inventory.revert_to_version(second.id, foreign).unwrap_err();
        assert!(matches!(err, StockError::Mismatch { .. }));

        // Neither store was touched for the second product.
        assert_eq!(inventory.get(second.id).unwrap(), second);
        assert!(inventory.history(second.id).unwrap().is_empty());
    }

    #[test]
    fn test_revert_to_unknown_version() {
        let inventory = inventory();
        let created = inventory.create(&draft("Widget", 10, 5)).unwrap();

        let err = inventory.revert_to_version(created.id, 42).unwrap_err();
        assert!(matches!(err, StockError::HistoryNotFound { .. }));
        assert!(inventory.history(created.id).unwrap().is_empty());
    }

    #[test]
    fn test_revert_to_last_restores_previous_version() {
        let inventory = inventory();
        let created = inventory.create(&draft("Widget", 10, 5)).unwrap();
        inventory.update(created.id, &draft("Widget-2", 12, 5)).unwrap();

        let reverted = inventory.revert_to_last_modified(created.id).unwrap();
        assert_eq!(reverted.name, "Widget");
        assert_eq!(reverted.price, Decimal::from(10));

        // One pre-revert snapshot was appended on top of the update snapshot.
        let history = inventory.history(created.id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].name, "Widget-2");
    }

    #[test]
    fn test_revert_to_last_without_history() {
        let inventory = inventory();
        let created = inventory.create(&draft("Widget", 10, 5)).unwrap();

        let err = inventory.revert_to_last_modified(created.id).unwrap_err();
        assert!(matches!(err, StockError::NoHistory { .. }));

        assert_eq!(inventory.get(created.id).unwrap(), created);
        assert!(inventory.history(created.id).unwrap().is_empty());
    }

    fn stored_widget(id: ProductId, deleted: bool) -> Product {
        Product {
            id,
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: Decimal::from(10),
            quantity: 5,
            deleted,
        }
    }

    #[test]
    fn test_restore_failure_writes_nothing() {
        let mut products = MockProductStore::new();
        products
            .expect_get()
            .returning(|id| Ok(Some(stored_widget(id, false))));
        products.expect_save().times(0);

        let history = MockHistoryStore::new();

        let inventory = Inventory::new(Arc::new(products), Arc::new(history));
        let err = inventory.restore(1).unwrap_err();
        assert!(matches!(err, StockError::InvalidState { .. }));
    }

    #[test]
    fn test_mismatch_failure_writes_nothing() {
        let mut products = MockProductStore::new();
        products
            .expect_get()
            .returning(|id| Ok(Some(stored_widget(id, false))));
        products.expect_save().times(0);

        let mut history = MockHistoryStore::new();
        history.expect_get().returning(|history_id| {
            Ok(Some(ProductHistory {
                id: history_id,
                product_id: 999,
                name: "Other".to_string(),
                description: "Belongs elsewhere".to_string(),
                price: Decimal::from(1),
                quantity: 1,
                modified_at: Utc::now(),
            }))
        });
        history.expect_append().times(0);

        let inventory = Inventory::new(Arc::new(products), Arc::new(history));
        let err = inventory.revert_to_version(1, 7).unwrap_err();
        assert!(matches!(err, StockError::Mismatch { .. }));
    }

    #[test]
    fn test_no_history_failure_writes_nothing() {
        let mut products = MockProductStore::new();
        products
            .expect_get()
            .returning(|id| Ok(Some(stored_widget(id, false))));
        products.expect_save().times(0);

        let mut history = MockHistoryStore::new();
        history.expect_latest().returning(|_| Ok(None));
        history.expect_append().times(0);

        let inventory = Inventory::new(Arc::new(products), Arc::new(history));
        let err = inventory.revert_to_last_modified(1).unwrap_err();
        assert!(matches!(err, StockError::NoHistory { .. }));
    }
}
