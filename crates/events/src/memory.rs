use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc};

use crate::broker::{Broker, MessageStream};
use crate::{EventError, Message, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
    Closed,
}

#[derive(Default)]
struct BrokerState {
    connection: ConnectionState,
    subscribers: HashMap<String, Vec<mpsc::UnboundedSender<Message>>>,
    /// Only kept when the broker was built with a publish log.
    published: Option<Vec<(String, Message)>>,
    fail_on_publish: bool,
}

/// In-memory broker for tests and the single-process deployment.
///
/// Every subscriber of a topic receives every message published on it after
/// the subscription was made. A broker built with
/// [`InMemoryBroker::with_publish_log`] also records every published message
/// so tests can inspect and replay them; a plain broker retains nothing once
/// delivered.
#[derive(Clone, Default)]
pub struct InMemoryBroker {
    state: Arc<RwLock<BrokerState>>,
}

impl InMemoryBroker {
    /// Creates a new, not yet connected, in-memory broker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a broker that records every published message.
    pub fn with_publish_log() -> Self {
        let state = BrokerState {
            published: Some(Vec::new()),
            ..BrokerState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Configures the broker to reject publishes.
    pub async fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().await.fail_on_publish = fail;
    }

    /// Returns every message published on a topic, oldest first. Always
    /// empty unless the broker keeps a publish log.
    pub async fn published(&self, topic: &str) -> Vec<Message> {
        self.state
            .read()
            .await
            .published
            .iter()
            .flatten()
            .filter(|(t, _)| t == topic)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Returns the number of live subscriptions on a topic.
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        self.state
            .read()
            .await
            .subscribers
            .get(topic)
            .map(|subs| subs.iter().filter(|s| !s.is_closed()).count())
            .unwrap_or(0)
    }

    /// Returns true while the broker is connected.
    pub async fn is_connected(&self) -> bool {
        self.state.read().await.connection == ConnectionState::Connected
    }

    fn ensure_connected(connection: ConnectionState) -> Result<()> {
        match connection {
            ConnectionState::Connected => Ok(()),
            ConnectionState::Disconnected => Err(EventError::NotConnected),
            ConnectionState::Closed => Err(EventError::Closed),
        }
    }
}

#[async_trait]
impl Broker for InMemoryBroker {
    async fn connect(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.connection == ConnectionState::Closed {
            return Err(EventError::Closed);
        }
        state.connection = ConnectionState::Connected;
        tracing::debug!("in-memory broker connected");
        Ok(())
    }

    async fn publish(&self, topic: &str, message: Message) -> Result<()> {
        let mut state = self.state.write().await;
        Self::ensure_connected(state.connection)?;

        if state.fail_on_publish {
            return Err(EventError::PublishFailed {
                topic: topic.to_string(),
                reason: "broker unavailable".to_string(),
            });
        }

        if let Some(log) = state.published.as_mut() {
            log.push((topic.to_string(), message.clone()));
        }

        if let Some(subscribers) = state.subscribers.get_mut(topic) {
            subscribers.retain(|tx| tx.send(message.clone()).is_ok());
        }

        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<MessageStream> {
        let mut state = self.state.write().await;
        Self::ensure_connected(state.connection)?;

        let (tx, rx) = mpsc::unbounded_channel();
        state
            .subscribers
            .entry(topic.to_string())
            .or_default()
            .push(tx);

        let stream = futures_util::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });
        Ok(Box::pin(stream))
    }

    async fn close(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.connection = ConnectionState::Closed;
        // Dropping the senders ends every subscription stream.
        state.subscribers.clear();
        tracing::debug!("in-memory broker closed");
        Ok(())
    }
}
