//! Product record and input types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a product row on insert, immutable thereafter.
pub type ProductId = i64;

/// A product record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price; non-negative.
    pub price: Decimal,
    /// Stock count; expected non-negative but not enforced.
    pub quantity: i64,
    /// Soft-delete flag. False on creation; history survives regardless.
    pub deleted: bool,
}

/// Incoming product fields for create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl Product {
    /// Overwrite the mutable fields from a draft. Id and deleted flag are untouched.
    pub fn apply(&mut self, draft: &ProductDraft) {
        self.name = draft.name.clone();
        self.description = draft.description.clone();
        self.price = draft.price;
        self.quantity = draft.quantity;
    }
}
