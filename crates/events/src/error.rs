use thiserror::Error;

/// Errors that can occur when publishing or consuming events.
#[derive(Debug, Error)]
pub enum EventError {
    /// The broker handle has not been connected yet.
    #[error("Broker is not connected")]
    NotConnected,

    /// The broker handle has been closed.
    #[error("Broker is closed")]
    Closed,

    /// The broker refused or failed to accept a message.
    #[error("Publish to '{topic}' failed: {reason}")]
    PublishFailed { topic: String, reason: String },

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The registered handler failed to process an event.
    #[error("Handler error: {0}")]
    Handler(String),
}

/// Result type for event pipeline operations.
pub type Result<T> = std::result::Result<T, EventError>;
