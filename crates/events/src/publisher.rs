//! Publishing side of the item-shipped pipeline.

use std::sync::Arc;

use async_trait::async_trait;

use crate::broker::Broker;
use crate::event::{ITEM_SHIPPED_TOPIC, ShipmentEvent};
use crate::Result;

/// Announces shipped items.
#[async_trait]
pub trait ShipmentPublisher: Send + Sync {
    /// Publishes an item-shipped event.
    async fn publish_item_shipped(&self, event: &ShipmentEvent) -> Result<()>;
}

/// Publishes item-shipped events on a broker.
#[derive(Clone)]
pub struct EventPublisher {
    broker: Arc<dyn Broker>,
}

impl EventPublisher {
    /// Creates a publisher on the given broker handle.
    pub fn new(broker: Arc<dyn Broker>) -> Self {
        Self { broker }
    }
}

#[async_trait]
impl ShipmentPublisher for EventPublisher {
    #[tracing::instrument(skip(self, event), fields(sku = %event.sku, order_id = event.order_id))]
    async fn publish_item_shipped(&self, event: &ShipmentEvent) -> Result<()> {
        let message = event.to_message()?;

        if let Err(e) = self.broker.publish(ITEM_SHIPPED_TOPIC, message).await {
            metrics::counter!("events_publish_failures_total").increment(1);
            tracing::warn!(error = %e, "failed to publish item shipped event");
            return Err(e);
        }

        metrics::counter!("events_published_total").increment(1);
        tracing::info!("published item shipped event");
        Ok(())
    }
}
