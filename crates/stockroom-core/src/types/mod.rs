//! Core domain types.

mod history;
mod product;

pub use history::{HistoryId, ProductHistory, Snapshot};
pub use product::{Product, ProductDraft, ProductId};
