use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// One notification as pushed by the server.
///
/// Identity is by `id` (stable, server-assigned): two notifications with the
/// same `id` are the same logical entity regardless of arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Stable server-assigned identifier.
    pub id: String,

    /// Notification category tag (e.g. "team_activity", "chat_message").
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Short headline shown on the notification card.
    pub title: String,

    /// Longer body text.
    #[serde(default)]
    pub body: String,

    /// Free-form key/value payload attached by the producer.
    #[serde(default)]
    pub metadata: HashMap<String, JsonValue>,

    /// Read state. Server pushes are authoritative; local optimistic
    /// mutations are provisional until the next server confirmation.
    #[serde(default)]
    pub is_read: bool,

    /// Server-side creation time.
    pub created_at: DateTime<Utc>,
}
