//! Warehouse service: validates requests and consults the repository.

use common::{ServiceError, StorageError};

use crate::error::WarehouseError;
use crate::model::{DetailsRequest, WarehouseDetails};
use crate::repository::WarehouseRepository;

/// Shortest SKU the warehouse recognizes.
pub const MIN_SKU_LEN: usize = 6;

/// Stateless warehouse request handler.
pub struct WarehouseService<R: WarehouseRepository> {
    repo: R,
}

impl<R: WarehouseRepository> WarehouseService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Looks up stock and provenance for a SKU.
    #[tracing::instrument(skip(self), fields(sku = %request.sku))]
    pub async fn get_warehouse_details(
        &self,
        request: &DetailsRequest,
    ) -> Result<WarehouseDetails, ServiceError> {
        if request.sku.is_empty() {
            return Err(WarehouseError::MissingRequest("details").into());
        }
        if request.sku.len() < MIN_SKU_LEN {
            return Err(WarehouseError::InvalidSku.into());
        }

        let exists = self
            .repo
            .sku_exists(&request.sku)
            .await
            .map_err(storage("Failed to check for SKU existence"))?;
        if !exists {
            return Err(WarehouseError::NoSuchSku.into());
        }

        let details = self
            .repo
            .get_warehouse_details(&request.sku)
            .await
            .map_err(storage("Failed to query warehouse details"))?;
        Ok(details)
    }
}

fn storage(context: &'static str) -> impl FnOnce(StorageError) -> WarehouseError {
    move |source| {
        tracing::error!(error = %source, context, "warehouse repository failure");
        WarehouseError::Storage { context, source }
    }
}
