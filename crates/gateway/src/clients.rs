//! Remote-call seams between the gateway and the domain services.
//!
//! Each client returns either the structured reply or a [`WireError`], the
//! single-string form a [`common::ServiceError`] takes on the wire. The
//! `Local*` adapters call a service in-process and encode its failures the
//! same way a transport would.

use async_trait::async_trait;
use catalog::{CatalogRepository, CatalogService, DetailRequest, Product};
use common::{Sku, WireError};
use events::ShipmentPublisher;
use shipping::{MarkShippedRequest, MarkShippedResponse, ShippingRepository, ShippingService};
use warehouse::{DetailsRequest, WarehouseDetails, WarehouseRepository, WarehouseService};

/// `GetProductDetails`.
#[async_trait]
pub trait CatalogClient: Send + Sync + 'static {
    async fn get_product_details(&self, sku: &Sku) -> Result<Product, WireError>;
}

/// `GetWarehouseDetails`.
#[async_trait]
pub trait WarehouseClient: Send + Sync + 'static {
    async fn get_warehouse_details(&self, sku: &Sku) -> Result<WarehouseDetails, WireError>;
}

/// `MarkItemShipped`.
#[async_trait]
pub trait ShippingClient: Send + Sync + 'static {
    async fn mark_item_shipped(
        &self,
        request: MarkShippedRequest,
    ) -> Result<MarkShippedResponse, WireError>;
}

pub struct LocalCatalogClient<R: CatalogRepository> {
    service: CatalogService<R>,
}

impl<R: CatalogRepository> LocalCatalogClient<R> {
    pub fn new(service: CatalogService<R>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: CatalogRepository + 'static> CatalogClient for LocalCatalogClient<R> {
    async fn get_product_details(&self, sku: &Sku) -> Result<Product, WireError> {
        let request = DetailRequest { sku: sku.clone() };
        Ok(self.service.get_product_details(&request).await?)
    }
}

pub struct LocalWarehouseClient<R: WarehouseRepository> {
    service: WarehouseService<R>,
}

impl<R: WarehouseRepository> LocalWarehouseClient<R> {
    pub fn new(service: WarehouseService<R>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: WarehouseRepository + 'static> WarehouseClient for LocalWarehouseClient<R> {
    async fn get_warehouse_details(&self, sku: &Sku) -> Result<WarehouseDetails, WireError> {
        let request = DetailsRequest { sku: sku.clone() };
        Ok(self.service.get_warehouse_details(&request).await?)
    }
}

pub struct LocalShippingClient<R: ShippingRepository, P: ShipmentPublisher> {
    service: ShippingService<R, P>,
}

impl<R: ShippingRepository, P: ShipmentPublisher> LocalShippingClient<R, P> {
    pub fn new(service: ShippingService<R, P>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, P> ShippingClient for LocalShippingClient<R, P>
where
    R: ShippingRepository + 'static,
    P: ShipmentPublisher + 'static,
{
    async fn mark_item_shipped(
        &self,
        request: MarkShippedRequest,
    ) -> Result<MarkShippedResponse, WireError> {
        Ok(self.service.mark_item_shipped(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::InMemoryCatalogRepository;
    use common::{ErrorClass, ServiceError};
    use warehouse::InMemoryWarehouseRepository;

    #[tokio::test]
    async fn test_catalog_failure_crosses_as_encoded_string() {
        let client = LocalCatalogClient::new(CatalogService::new(InMemoryCatalogRepository::new()));
        let wire = client
            .get_product_details(&Sku::new("8675309"))
            .await
            .unwrap_err();

        let decoded = ServiceError::from(wire);
        assert_eq!(decoded.class(), ErrorClass::NotFound);
        assert_eq!(decoded.message(), "No such product");
    }

    #[tokio::test]
    async fn test_warehouse_validation_crosses_as_bad_request() {
        let client =
            LocalWarehouseClient::new(WarehouseService::new(InMemoryWarehouseRepository::new()));
        let wire = client
            .get_warehouse_details(&Sku::new("11"))
            .await
            .unwrap_err();

        assert_eq!(ServiceError::from(wire).status_code(), 400);
    }
}
