use common::{ShippingMethod, Sku};
use serde::{Deserialize, Serialize};

/// Price of shipping with one carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingCost {
    /// Price in the smallest currency unit.
    pub price: i64,
    pub method: ShippingMethod,
}

/// Shipping state of one item within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingStatus {
    pub shipping_method: ShippingMethod,
    pub tracking_number: String,
    pub shipped: bool,
}

impl ShippingStatus {
    /// Status of an item that has not left yet.
    pub fn not_shipped() -> Self {
        Self {
            shipping_method: ShippingMethod::Unknown,
            tracking_number: String::new(),
            shipped: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingCostRequest {
    pub sku: Sku,
    pub zip_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkShippedRequest {
    pub order_id: u64,
    pub sku: Sku,
    pub shipping_method: ShippingMethod,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkShippedResponse {
    pub tracking_number: String,
    /// False when the item was recorded as shipped but the announcement
    /// could not be published.
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingStatusRequest {
    pub order_id: u64,
    pub sku: Sku,
}
