use common::{ServiceError, StorageError};
use thiserror::Error;

/// Errors that can occur during warehouse operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WarehouseError {
    /// The request was missing its required fields.
    #[error("Missing {0} request")]
    MissingRequest(&'static str),

    /// The SKU is too short to be a warehouse SKU.
    #[error("Invalid SKU")]
    InvalidSku,

    /// The SKU is not stocked.
    #[error("No such SKU")]
    NoSuchSku,

    /// The repository failed.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        source: StorageError,
    },
}

impl From<WarehouseError> for ServiceError {
    fn from(err: WarehouseError) -> Self {
        let message = err.to_string();
        match err {
            WarehouseError::MissingRequest(_) | WarehouseError::InvalidSku => {
                ServiceError::bad_request(message)
            }
            WarehouseError::NoSuchSku => ServiceError::not_found(message),
            WarehouseError::Storage { .. } => ServiceError::internal(message),
        }
    }
}
