//! Concurrent product lookup across catalog and warehouse.
//!
//! Both legs are spawned before either is awaited. The join order is fixed:
//! catalog first, then warehouse. A failing catalog leg is returned at once
//! and the warehouse leg is aborted. Each leg writes its single outcome into
//! a oneshot channel, so an abandoned leg never blocks on delivery.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use catalog::Product;
use common::{ServiceError, Sku, WireError};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warehouse::WarehouseDetails;

use crate::clients::{CatalogClient, WarehouseClient};

/// Public view of a product, assembled from catalog and warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub sku: Sku,
    pub name: String,
    pub description: String,
    pub manufacturer: String,
    pub model: String,
    pub price: i64,
    pub stock_remaining: u32,
}

impl ProductView {
    /// Catalog supplies everything except stock. The two SKUs are not
    /// cross-checked.
    pub fn merge(product: Product, details: WarehouseDetails) -> Self {
        Self {
            sku: product.sku,
            name: product.name,
            description: product.description,
            manufacturer: product.manufacturer,
            model: product.model,
            price: product.price,
            stock_remaining: details.stock_remaining,
        }
    }
}

/// Fans a product lookup out to catalog and warehouse and joins the replies.
pub struct RequestAggregator<C: CatalogClient, W: WarehouseClient> {
    catalog: Arc<C>,
    warehouse: Arc<W>,
    leg_timeout: Duration,
}

impl<C: CatalogClient, W: WarehouseClient> RequestAggregator<C, W> {
    pub fn new(catalog: Arc<C>, warehouse: Arc<W>, leg_timeout: Duration) -> Self {
        Self {
            catalog,
            warehouse,
            leg_timeout,
        }
    }

    /// Looks up a product in both services and merges the results.
    ///
    /// Returns the catalog error when catalog fails, otherwise the warehouse
    /// error when warehouse fails.
    #[tracing::instrument(skip(self), fields(sku = %sku))]
    pub async fn get_product(&self, sku: &Sku) -> Result<ProductView, ServiceError> {
        let catalog_leg = {
            let client = Arc::clone(&self.catalog);
            let sku = sku.clone();
            Leg::spawn(self.leg_timeout, async move {
                client.get_product_details(&sku).await
            })
        };
        let warehouse_leg = {
            let client = Arc::clone(&self.warehouse);
            let sku = sku.clone();
            Leg::spawn(self.leg_timeout, async move {
                client.get_warehouse_details(&sku).await
            })
        };

        let product = catalog_leg.join("catalog").await.inspect_err(|e| {
            tracing::debug!(error = %e, "catalog lookup failed, abandoning warehouse lookup");
        })?;
        // Dropping a leg aborts its task, so an early return above also
        // cancels the warehouse lookup.
        let details = warehouse_leg.join("warehouse").await?;

        Ok(ProductView::merge(product, details))
    }
}

/// One spawned downstream call and the receiving end of its outcome.
struct Leg<T> {
    outcome: oneshot::Receiver<Result<T, WireError>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Leg<T> {
    fn spawn<F>(deadline: Duration, call: F) -> Self
    where
        F: Future<Output = Result<T, WireError>> + Send + 'static,
    {
        let (tx, outcome) = oneshot::channel();
        let task = tokio::spawn(async move {
            let result = match tokio::time::timeout(deadline, call).await {
                Ok(result) => result,
                Err(_) => Err(ServiceError::internal("deadline exceeded").into()),
            };
            // The receiver is gone when the join abandoned this leg.
            let _ = tx.send(result);
        });
        Self { outcome, task }
    }

    async fn join(mut self, name: &'static str) -> Result<T, ServiceError> {
        match (&mut self.outcome).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(wire)) => Err(ServiceError::from(wire)),
            Err(_) => {
                tracing::error!(leg = name, "downstream call ended without a reply");
                Err(ServiceError::internal(format!(
                    "{name} lookup did not complete"
                )))
            }
        }
    }
}

impl<T> Drop for Leg<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
