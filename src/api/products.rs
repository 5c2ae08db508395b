use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiClient, ApiError};
use crate::state::data::{Category, CategoryId};

pub const PRODUCTS_PATH: &str = "/api/products";

/// Body of `POST /api/products`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: String,
    pub content: String,
    /// Flat fee charged per rental
    pub base_fee: u32,
    pub fee_per_day: u32,
    /// Charged per day past the return date
    pub overdue_fee: u32,
    /// In days
    pub minimum_rental_period: u32,
    pub category_ids: Vec<CategoryId>,
}

/// Response to a successful create
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductResponse {
    pub product_id: String,
    pub title: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl ApiClient {
    /// Create a listing and return the server's view of it
    pub async fn create_product(&self, request: &CreateProductRequest) -> Result<CreateProductResponse, ApiError> {
        let url = self.url(PRODUCTS_PATH);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| ApiError::Request { url: url.clone(), source })?;

        let created: CreateProductResponse = Self::read_json(&url, response).await?;
        info!(product_id = %created.product_id, "created listing");

        Ok(created)
    }
}
