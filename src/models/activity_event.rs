use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One entry in the live team-activity feed.
///
/// The server pushes several frame types that all land in the same feed
/// (`team_activity`, `question_completed`, `affirmation_received`,
/// `chat_message`); the payload shape varies per kind, so it is carried
/// verbatim and decoded by whichever UI surface renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// The frame's `type` discriminator.
    pub kind: String,

    /// The frame payload as received, including the discriminator field.
    pub payload: JsonValue,
}

impl ActivityEvent {
    pub fn new(kind: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}
