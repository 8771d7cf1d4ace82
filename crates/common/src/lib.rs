//! Shared types for the commerce services.

pub mod error;
pub mod types;

pub use error::{ErrorClass, ServiceError, StorageError, TransportHint, WireError};
pub use types::{ShippingMethod, Sku};
