//! Error types for the notify-link client.

use thiserror::Error;

/// Errors produced by the notify-link client.
#[derive(Error, Debug)]
pub enum NotifyLinkError {
    /// Invalid client configuration (bad URL, missing required option, ...).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Socket-level failure or abnormal WebSocket termination.
    ///
    /// Recovered automatically via the reconnect policy up to the attempt
    /// cap; only surfaced to callers once recovery is impossible.
    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    /// The server rejected the connection credential (HTTP 401/403 during
    /// the WebSocket handshake). Terminal for the current token — retrying
    /// with the same token cannot succeed.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// An operation did not complete within its configured window.
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// A frame that cannot be decoded or lacks a `type` discriminator.
    /// Logged and dropped; never fatal to the connection.
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// `send()` was called while the connection is not open. Callers must
    /// not assume delivery; there is no queuing at this layer.
    #[error("Not connected")]
    NotConnected,

    /// The reconnect policy ran out of attempts. No further automatic retry
    /// happens until `connect()` is called again explicitly.
    #[error("Reconnect attempts exhausted after {0} attempt(s)")]
    ReconnectExhausted(u32),

    /// JSON serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Internal invariant violation (poisoned lock, dead background task).
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NotifyLinkError>;
