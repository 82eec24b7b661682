//! Product history types.
//!
//! A snapshot captures a product's field values immediately before a mutation
//! overwrites them. Once written, history records are immutable and append-only;
//! they are never updated or deleted, and they outlive soft deletion.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::product::{Product, ProductId};

/// Identifier assigned to a history row on insert.
pub type HistoryId = i64;

/// A stored snapshot of a product's fields at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductHistory {
    /// Unique snapshot identifier.
    pub id: HistoryId,
    /// Product this snapshot belongs to. Back-reference only; no cascade.
    pub product_id: ProductId,
    /// Name at snapshot time.
    pub name: String,
    /// Description at snapshot time.
    pub description: String,
    /// Price at snapshot time.
    pub price: Decimal,
    /// Quantity at snapshot time.
    pub quantity: i64,
    /// When the snapshot was taken.
    pub modified_at: DateTime<Utc>,
}

impl ProductHistory {
    /// Overwrite a product's mutable fields with this snapshot's values.
    /// Id and deleted flag are untouched.
    pub fn apply_to(&self, product: &mut Product) {
        product.name = self.name.clone();
        product.description = self.description.clone();
        product.price = self.price;
        product.quantity = self.quantity;
    }
}

/// A snapshot captured from a product, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    pub modified_at: DateTime<Utc>,
}

impl Snapshot {
    /// Capture the current field values of a product, timestamped now.
    pub fn of(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity: product.quantity,
            modified_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: Decimal::from(10),
            quantity: 5,
            deleted: false,
        }
    }

    #[test]
    fn test_snapshot_captures_fields() {
        let product = widget();
        let snapshot = Snapshot::of(&product);

        assert_eq!(snapshot.product_id, 1);
        assert_eq!(snapshot.name, "Widget");
        assert_eq!(snapshot.price, Decimal::from(10));
        assert_eq!(snapshot.quantity, 5);
    }

    #[test]
    fn test_apply_to_restores_fields() {
        let mut product = widget();
        product.name = "Widget-2".to_string();
        product.price = Decimal::from(12);
        product.deleted = true;

        let record = ProductHistory {
            id: 9,
            product_id: 1,
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: Decimal::from(10),
            quantity: 5,
            modified_at: Utc::now(),
        };

        record.apply_to(&mut product);

        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, Decimal::from(10));
        // The deleted flag is orthogonal to content versions.
        assert!(product.deleted);
    }
}
