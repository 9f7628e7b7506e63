use serde::{Deserialize, Serialize};

/// Client-to-server frames.
///
/// Every frame on the wire is a flat JSON object with a `type` discriminator;
/// the client only ever sends these two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Heartbeat keep-alive. The server answers with a `pong` frame.
    Ping,

    /// Ask the server to mark one notification as read. Confirmation comes
    /// back asynchronously as a later `notification` / `badge_update` push.
    MarkRead {
        /// Identifier of the notification being acknowledged.
        notification_id: String,
    },
}
