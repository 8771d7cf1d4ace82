//! Catalog records and request types.

use common::Sku;
use serde::{Deserialize, Serialize};

/// A product as described by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    pub description: String,
    pub manufacturer: String,
    pub model: String,
    /// Price in the smallest currency unit.
    pub price: i64,
}

/// A grouping of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: u64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRequest {
    pub sku: Sku,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProductsRequest {
    pub category_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub search_term: String,
    /// Restricts the search to these categories. Empty means all.
    #[serde(default)]
    pub categories: Vec<u64>,
}
