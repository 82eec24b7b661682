//! stockroom-client - Client library for the stockroom REST API.
//!
//! # Example
//!
//! ```ignore
//! use stockroom_client::StockroomClient;
//!
//! let client = StockroomClient::new("http://localhost:8080")?;
//!
//! let product = client.create_product(&draft).await?;
//! let history = client.history(product.id).await?;
//! client.revert_to_version(product.id, history[0].id).await?;
//! ```

mod client;

pub use client::StockroomClient;
pub use stockroom_core::{Product, ProductDraft, ProductHistory};
