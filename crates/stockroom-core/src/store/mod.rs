//! Persistence layer: product and history stores.

mod history;
mod products;

pub use history::{HistoryStore, SqliteHistoryStore};
pub use products::{ProductStore, SqliteProductStore};

#[cfg(test)]
pub use history::MockHistoryStore;
#[cfg(test)]
pub use products::MockProductStore;
