//! Catalog error types and their translation into service errors.

use common::{ServiceError, StorageError};
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The request was missing its required fields.
    #[error("Missing {0} request")]
    MissingRequest(&'static str),

    /// Search term was too short.
    #[error("Bad search term")]
    BadSearchTerm,

    /// The requested category does not exist.
    #[error("No such category")]
    NoSuchCategory,

    /// The requested product does not exist.
    #[error("No such product")]
    NoSuchProduct,

    /// The repository failed.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        source: StorageError,
    },
}

impl From<CatalogError> for ServiceError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::MissingRequest(_) | CatalogError::BadSearchTerm => {
                ServiceError::bad_request(message)
            }
            CatalogError::NoSuchCategory | CatalogError::NoSuchProduct => {
                ServiceError::not_found(message)
            }
            CatalogError::Storage { .. } => ServiceError::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ErrorClass, TransportHint};

    #[test]
    fn every_variant_maps_to_its_class_and_hint() {
        let cases = [
            (
                CatalogError::MissingRequest("details"),
                ErrorClass::BadRequest,
                TransportHint::BadRequest,
            ),
            (
                CatalogError::BadSearchTerm,
                ErrorClass::BadRequest,
                TransportHint::BadRequest,
            ),
            (
                CatalogError::NoSuchCategory,
                ErrorClass::NotFound,
                TransportHint::NotFound,
            ),
            (
                CatalogError::NoSuchProduct,
                ErrorClass::NotFound,
                TransportHint::NotFound,
            ),
            (
                CatalogError::Storage {
                    context: "Failed to query product",
                    source: StorageError::new("Faily Fail"),
                },
                ErrorClass::InternalError,
                TransportHint::InternalError,
            ),
        ];

        for (err, class, hint) in cases {
            let service_err = ServiceError::from(err);
            assert_eq!(service_err.class(), class);
            assert_eq!(service_err.hint(), hint);
        }
    }

    #[test]
    fn storage_message_keeps_the_cause() {
        let err = ServiceError::from(CatalogError::Storage {
            context: "Failed to query product",
            source: StorageError::new("Faily Fail"),
        });
        assert_eq!(err.message(), "Failed to query product: Faily Fail");
    }
}
