//! Message broker abstraction and the item-shipped event pipeline.
//!
//! - [`Broker`] is the explicit broker handle, with [`InMemoryBroker`] as the
//!   in-process implementation
//! - [`EventPublisher`] announces [`ShipmentEvent`]s on the `item.shipped` topic
//! - [`EventConsumer`] subscribes to that topic and feeds a [`ShipmentHandler`]

pub mod broker;
pub mod consumer;
pub mod error;
pub mod event;
pub mod memory;
pub mod message;
pub mod publisher;

pub use broker::{Broker, MessageStream};
pub use consumer::{ConsumerHandle, EventConsumer, ShipmentHandler};
pub use error::{EventError, Result};
pub use event::{HEADER_ORDER_ID, HEADER_SKU, ITEM_SHIPPED_TOPIC, ShipmentEvent};
pub use memory::InMemoryBroker;
pub use message::Message;
pub use publisher::{EventPublisher, ShipmentPublisher};
