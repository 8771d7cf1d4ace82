//! Stock reaction to item-shipped events.
//!
//! Each `(order_id, sku)` pair decrements stock at most once. The pair is
//! claimed before the decrement and released again when the decrement fails,
//! so a later redelivery can still apply it.

use async_trait::async_trait;
use events::{EventError, ShipmentEvent, ShipmentHandler};

use crate::repository::WarehouseRepository;

/// Decrements on-hand stock once per shipped item.
pub struct StockDecrementHandler<R: WarehouseRepository> {
    repo: R,
}

impl<R: WarehouseRepository> StockDecrementHandler<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}

#[async_trait]
impl<R: WarehouseRepository> ShipmentHandler for StockDecrementHandler<R> {
    #[tracing::instrument(skip(self, event), fields(sku = %event.sku, order_id = event.order_id))]
    async fn handle(&self, event: ShipmentEvent) -> events::Result<()> {
        let claimed = self
            .repo
            .claim_shipment(event.order_id, &event.sku)
            .await
            .map_err(|e| EventError::Handler(format!("Failed to record shipment: {e}")))?;
        if !claimed {
            metrics::counter!("warehouse_duplicate_shipments_total").increment(1);
            tracing::info!("shipment already applied, skipping");
            return Ok(());
        }

        if let Err(e) = self.repo.decrement_stock(&event.sku).await {
            if let Err(release) = self.repo.release_shipment(event.order_id, &event.sku).await {
                tracing::error!(error = %release, "failed to release shipment claim");
            }
            return Err(EventError::Handler(format!("Failed to decrement stock: {e}")));
        }

        metrics::counter!("warehouse_stock_decrements_total").increment(1);
        tracing::info!(tracking_number = %event.tracking_number, "decremented stock");
        Ok(())
    }
}
