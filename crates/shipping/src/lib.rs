//! Shipping service.
//!
//! Quotes shipping costs, reports shipment status, and marks order items as
//! shipped. Every shipment is announced on the event bus so that other
//! services can react without being called directly.

pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use error::ShippingError;
pub use model::{
    MarkShippedRequest, MarkShippedResponse, ShippingCost, ShippingCostRequest, ShippingStatus,
    ShippingStatusRequest,
};
pub use repository::{InMemoryShippingRepository, ShippingRepository};
pub use service::ShippingService;
