//! # notify-link
//!
//! Realtime notification delivery client. Maintains one persistent,
//! authenticated WebSocket push connection per session and keeps the
//! user-visible notification state (list, unread badge, toasts, live
//! team-activity feed) eventually consistent with the server across network
//! interruptions.
//!
//! - Automatic reconnection with exponential backoff and a hard attempt cap
//! - Heartbeat pings with an optional pong-timeout watchdog
//! - A typed event bus decoupling the transport from independent consumers
//! - Optimistic `mark_read` mutations reconciled against server pushes
//!
//! Delivery is at-most-once, best-effort: frames pushed while the client is
//! disconnected are lost at this layer, and an external REST full-state
//! fetch (consumed through [`NotificationStore::hydrate`]) closes that gap
//! after reconnects.
//!
//! # Example
//!
//! ```rust,no_run
//! use notify_link::SessionController;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = SessionController::new("https://app.example.com")?;
//! session.sign_in("bearer-token").await?;
//!
//! let mut toasts = session.take_toasts().expect("first take");
//! while let Some(toast) = toasts.recv().await {
//!     println!("[{}] {}", toast.level, toast.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backoff;
pub mod connection;
pub mod error;
pub mod event_bus;
pub mod models;
pub mod session;
pub mod store;
pub mod timeouts;

pub use backoff::ReconnectPolicy;
pub use connection::{
    ConnectionManager, ConnectionState, FrameSender, EVENT_AUTH_FAILED, EVENT_CONNECTED,
    EVENT_DISCONNECTED, EVENT_RECONNECT_FAILED,
};
pub use error::{NotifyLinkError, Result};
pub use event_bus::{EventBus, EventSubscription};
pub use models::{
    ActivityEvent, BadgeUpdate, ClientFrame, ConnectionOptions, Notification, Toast, ToastLevel,
};
pub use session::{SessionController, SessionStatus};
pub use store::{NotificationStore, UnreadBadge};
pub use timeouts::NotifyLinkTimeouts;
