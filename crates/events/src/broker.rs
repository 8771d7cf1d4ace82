use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::{Message, Result};

/// A stream of messages delivered on a subscribed topic.
///
/// The stream ends when the broker is closed.
pub type MessageStream = Pin<Box<dyn Stream<Item = Message> + Send>>;

/// Handle to a message broker.
///
/// A broker handle is constructed once per process, connected at startup and
/// closed at shutdown. Publishers and consumers receive the handle
/// explicitly. Delivery is at-least-once with no ordering guarantee.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Opens the connection to the broker.
    async fn connect(&self) -> Result<()>;

    /// Publishes a message on a topic.
    async fn publish(&self, topic: &str, message: Message) -> Result<()>;

    /// Subscribes to a topic.
    async fn subscribe(&self, topic: &str) -> Result<MessageStream>;

    /// Closes the connection. Every open subscription stream ends.
    async fn close(&self) -> Result<()>;
}
