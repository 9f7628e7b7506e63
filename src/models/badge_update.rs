use serde::{Deserialize, Serialize};

/// Authoritative unread-count push from the server (`type = "badge_update"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeUpdate {
    /// Server-side number of unread notifications.
    pub unread_count: u32,
}
