//! Consuming side of the item-shipped pipeline.
//!
//! The consumer owns a long-lived listener task per subscription. Every
//! delivered message is decoded and handed to the registered handler.
//! Messages that do not decode are dropped (logged and counted); handler
//! failures are logged and counted. Neither ends the subscription.
//!
//! Delivery is at-least-once: the consumer keeps no record of what it has
//! already seen, so a redelivered message reaches the handler again.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::broker::Broker;
use crate::event::{HEADER_ORDER_ID, HEADER_SKU, ITEM_SHIPPED_TOPIC, ShipmentEvent};
use crate::{EventError, Message, Result};

/// Local reaction to an item-shipped event.
#[async_trait]
pub trait ShipmentHandler: Send + Sync {
    async fn handle(&self, event: ShipmentEvent) -> Result<()>;
}

/// Subscribes to item-shipped events and feeds them to a handler.
pub struct EventConsumer<H: ShipmentHandler> {
    handler: Arc<H>,
}

impl<H: ShipmentHandler + 'static> EventConsumer<H> {
    /// Creates a consumer for the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Decodes one message and hands it to the handler.
    ///
    /// Returns the decode error without invoking the handler when the body
    /// is not a valid event.
    #[tracing::instrument(
        skip(self, message),
        fields(
            message_id = %message.id,
            sku = message.header(HEADER_SKU).unwrap_or(""),
            order_id = message.header(HEADER_ORDER_ID).unwrap_or(""),
        )
    )]
    pub async fn deliver(&self, message: &Message) -> Result<()> {
        let event = match ShipmentEvent::from_message(message) {
            Ok(event) => event,
            Err(e) => {
                metrics::counter!("events_decode_failures_total").increment(1);
                tracing::warn!(error = %e, "failed to decode item shipped event");
                return Err(e);
            }
        };

        metrics::counter!("events_consumed_total").increment(1);
        tracing::debug!(tracking_number = %event.tracking_number, "received item shipped event");

        if let Err(e) = self.handler.handle(event).await {
            metrics::counter!("events_handler_failures_total").increment(1);
            tracing::error!(error = %e, "item shipped handler failed");
            return Err(e);
        }
        Ok(())
    }

    /// Subscribes to the item-shipped topic and spawns the listener task.
    ///
    /// The task runs until [`ConsumerHandle::shutdown`] is called or the
    /// broker closes the subscription. Dropping the handle detaches the task:
    /// it keeps consuming until the broker closes.
    pub async fn start(self, broker: Arc<dyn Broker>) -> Result<ConsumerHandle> {
        let mut stream = broker.subscribe(ITEM_SHIPPED_TOPIC).await?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let shutdown = async move {
                if shutdown_rx.await.is_err() {
                    tracing::debug!(topic = ITEM_SHIPPED_TOPIC, "consumer handle dropped, detaching");
                    std::future::pending::<()>().await;
                }
            };
            tokio::pin!(shutdown);

            tracing::info!(topic = ITEM_SHIPPED_TOPIC, "event consumer started");
            loop {
                tokio::select! {
                    () = &mut shutdown => {
                        tracing::info!(topic = ITEM_SHIPPED_TOPIC, "event consumer shutting down");
                        break;
                    }
                    next = stream.next() => match next {
                        // Failures are already logged and counted by deliver.
                        Some(message) => {
                            let _ = self.deliver(&message).await;
                        }
                        None => {
                            tracing::info!(topic = ITEM_SHIPPED_TOPIC, "subscription closed by broker");
                            break;
                        }
                    },
                }
            }
        });

        Ok(ConsumerHandle {
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

/// Controls the lifetime of a running consumer.
///
/// Dropping the handle does not stop the listener; only
/// [`ConsumerHandle::shutdown`] or a broker close does.
pub struct ConsumerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ConsumerHandle {
    /// Returns true once the listener task has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the listener and waits for it to finish.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            // The task may already have ended on its own.
            let _ = tx.send(());
        }
        self.task
            .await
            .map_err(|e| EventError::Handler(format!("consumer task failed: {e}")))
    }
}
