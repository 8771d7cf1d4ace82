use common::Sku;
use serde::{Deserialize, Serialize};

/// What the warehouse knows about a stocked SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseDetails {
    pub sku: Sku,
    pub manufacturer: String,
    pub model: String,
    pub stock_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsRequest {
    pub sku: Sku,
}
