//! Typed client for the stockroom REST API.

use reqwest::Client;
use serde::Deserialize;

use stockroom_core::error::{StockError, StockResult};
use stockroom_core::{HistoryId, Product, ProductDraft, ProductHistory, ProductId};

/// Client for the stockroom REST API.
pub struct StockroomClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ProductListResponse {
    results: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct ProductHistoryResponse {
    history: Vec<ProductHistory>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl StockroomClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the STOCKROOM_BASE_URL environment variable.
    pub fn from_env() -> StockResult<Self> {
        let base_url = std::env::var("STOCKROOM_BASE_URL")
            .map_err(|_| StockError::Configuration("STOCKROOM_BASE_URL not set".to_string()))?;
        Ok(Self::new(base_url))
    }

    /// Map a non-success response into the core error taxonomy, preferring the
    /// message from the server's error envelope when one is present.
    async fn error_from_response(response: reqwest::Response) -> StockError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => StockError::from_http_status(status, &envelope.error.message),
            Err(_) => StockError::from_http_status(status, &body),
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> StockResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| StockError::network(format!("Failed to parse response: {}", e)))
    }

    /// Create a new product.
    pub async fn create_product(&self, draft: &ProductDraft) -> StockResult<Product> {
        let response = self
            .client
            .post(format!("{}/products", self.base_url))
            .json(draft)
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to create product: {}", e)))?;

        Self::parse(response).await
    }

    /// List all active products.
    pub async fn list_products(&self) -> StockResult<Vec<Product>> {
        let response = self
            .client
            .get(format!("{}/products", self.base_url))
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to list products: {}", e)))?;

        let result: ProductListResponse = Self::parse(response).await?;
        Ok(result.results)
    }

    /// List all soft-deleted products.
    pub async fn list_deleted_products(&self) -> StockResult<Vec<Product>> {
        let response = self
            .client
            .get(format!("{}/products/deleted", self.base_url))
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to list deleted products: {}", e)))?;

        let result: ProductListResponse = Self::parse(response).await?;
        Ok(result.results)
    }

    /// Get a specific product by ID.
    pub async fn get_product(&self, id: ProductId) -> StockResult<Product> {
        let response = self
            .client
            .get(format!("{}/products/{}", self.base_url, id))
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to get product: {}", e)))?;

        Self::parse(response).await
    }

    /// Update a product, snapshotting its prior state server-side.
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> StockResult<Product> {
        let response = self
            .client
            .put(format!("{}/products/{}", self.base_url, id))
            .json(draft)
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to update product: {}", e)))?;

        Self::parse(response).await
    }

    /// Soft-delete a product.
    pub async fn soft_delete_product(&self, id: ProductId) -> StockResult<()> {
        let response = self
            .client
            .delete(format!("{}/products/{}", self.base_url, id))
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to delete product: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Restore a soft-deleted product.
    pub async fn restore_product(&self, id: ProductId) -> StockResult<Product> {
        let response = self
            .client
            .put(format!("{}/products/restore/{}", self.base_url, id))
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to restore product: {}", e)))?;

        Self::parse(response).await
    }

    /// Get a product's modification history, newest first.
    pub async fn history(&self, id: ProductId) -> StockResult<Vec<ProductHistory>> {
        let response = self
            .client
            .get(format!("{}/products/{}/history", self.base_url, id))
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to get history: {}", e)))?;

        let result: ProductHistoryResponse = Self::parse(response).await?;
        Ok(result.history)
    }

    /// Revert a product to its most recent recorded version.
    pub async fn revert_to_last_modified(&self, id: ProductId) -> StockResult<Product> {
        let response = self
            .client
            .put(format!("{}/products/{}/revert", self.base_url, id))
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to revert product: {}", e)))?;

        Self::parse(response).await
    }

    /// Revert a product to a specific historical version.
    pub async fn revert_to_version(
        &self,
        id: ProductId,
        history_id: HistoryId,
    ) -> StockResult<Product> {
        let response = self
            .client
            .put(format!(
                "{}/products/{}/revert/{}",
                self.base_url, id, history_id
            ))
            .send()
            .await
            .map_err(|e| StockError::network(format!("Failed to revert product: {}", e)))?;

        Self::parse(response).await
    }
}
