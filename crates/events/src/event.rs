use chrono::Utc;
use common::{ShippingMethod, Sku};
use serde::{Deserialize, Serialize};

use crate::{Message, Result};

/// Topic on which item-shipped events are announced.
pub const ITEM_SHIPPED_TOPIC: &str = "item.shipped";

/// Header carrying the SKU of the shipped item.
pub const HEADER_SKU: &str = "sku";

/// Header carrying the decimal order id.
pub const HEADER_ORDER_ID: &str = "order-id";

pub const HEADER_CONTENT_TYPE: &str = "content-type";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Announcement that one item of an order has left the building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentEvent {
    pub sku: Sku,
    pub order_id: u64,
    pub tracking_number: String,
    pub shipping_method: ShippingMethod,
    pub note: String,
    /// UTC epoch seconds at the time the event was created.
    pub timestamp: i64,
}

impl ShipmentEvent {
    /// Creates an event stamped with the current UTC time.
    pub fn new(
        sku: Sku,
        order_id: u64,
        tracking_number: impl Into<String>,
        shipping_method: ShippingMethod,
        note: impl Into<String>,
    ) -> Self {
        Self {
            sku,
            order_id,
            tracking_number: tracking_number.into(),
            shipping_method,
            note: note.into(),
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Serializes the event into a broker message with routing headers.
    pub fn to_message(&self) -> Result<Message> {
        let body = serde_json::to_vec(self)?;
        Ok(Message::new(body)
            .with_header(HEADER_SKU, self.sku.as_str())
            .with_header(HEADER_ORDER_ID, self.order_id.to_string())
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON))
    }

    /// Deserializes an event from a message body. Headers are not consulted.
    pub fn from_message(message: &Message) -> Result<Self> {
        Ok(serde_json::from_slice(&message.body)?)
    }
}
