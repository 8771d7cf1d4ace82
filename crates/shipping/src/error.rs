use common::{ServiceError, StorageError};
use thiserror::Error;

/// Errors that can occur during shipping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShippingError {
    /// The request was missing its required fields.
    #[error("Missing {0} request")]
    MissingRequest(&'static str),

    /// The request named no usable shipping method.
    #[error("Must supply a valid shipping method")]
    InvalidShippingMethod,

    /// The SKU is unknown to shipping.
    #[error("No such SKU")]
    NoSuchSku,

    /// The order is unknown to shipping.
    #[error("No such order")]
    NoSuchOrder,

    /// The repository failed.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        source: StorageError,
    },
}

impl From<ShippingError> for ServiceError {
    fn from(err: ShippingError) -> Self {
        let message = err.to_string();
        match err {
            ShippingError::MissingRequest(_) | ShippingError::InvalidShippingMethod => {
                ServiceError::bad_request(message)
            }
            ShippingError::NoSuchSku | ShippingError::NoSuchOrder => {
                ServiceError::not_found(message)
            }
            ShippingError::Storage { .. } => ServiceError::internal(message),
        }
    }
}
