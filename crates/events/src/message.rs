use std::collections::HashMap;

use uuid::Uuid;

/// A message as carried by the broker: routing headers plus an opaque body.
///
/// Headers exist so that infrastructure can inspect and route a message
/// without deserializing the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Broker-assigned identity of this delivery. Redeliveries keep it.
    pub id: Uuid,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Message {
    /// Creates a message with a fresh id and no headers.
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            headers: HashMap::new(),
            body,
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Returns a header value, if present.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}
