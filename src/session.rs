//! Session controller: binds the push connection to the authentication
//! lifecycle and routes bus events to the store and the ephemeral UI
//! surfaces.
//!
//! This component is glue, not core: it has no state machine of its own.
//! Connect on sign-in, disconnect + reset on sign-out, and fan events out.

use crate::{
    connection::{
        ConnectionManager, ConnectionState, EVENT_AUTH_FAILED, EVENT_CONNECTED,
        EVENT_DISCONNECTED, EVENT_RECONNECT_FAILED,
    },
    error::Result,
    event_bus::{EventBus, EventSubscription},
    models::{ActivityEvent, BadgeUpdate, ConnectionOptions, Notification, Toast},
    store::NotificationStore,
    timeouts::NotifyLinkTimeouts,
};
use serde_json::Value as JsonValue;
use std::sync::Mutex;
use tokio::sync::{mpsc, watch};

/// Frame tags routed into the notification store.
const TAG_NOTIFICATION: &str = "notification";
const TAG_BADGE_UPDATE: &str = "badge_update";
/// Frame tags routed into the ephemeral UI surfaces.
const TAG_TOAST: &str = "toast";
const ACTIVITY_TAGS: [&str; 4] = [
    "team_activity",
    "question_completed",
    "affirmation_received",
    "chat_message",
];

/// Capacity of the toast and activity-feed channels. These are ephemeral UI
/// signals; when nobody drains them, new entries are dropped.
const UI_CHANNEL_CAPACITY: usize = 64;

/// Coarse connection status surfaced to the UI (offline indicator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Not connected (initial state, or after a disconnect while automatic
    /// recovery may still be in progress).
    #[default]
    Offline,
    /// Push connection is open.
    Online,
    /// The reconnect policy gave up; no automatic retry until the next
    /// explicit sign-in.
    ReconnectFailed,
    /// The server rejected the credential; re-authentication is required.
    AuthRequired,
}

/// Top-level orchestrator for one authenticated session.
///
/// Owns the event bus, the connection manager, and the notification store,
/// and wires them together. Construct one per session; tests construct
/// isolated instances instead of sharing global state.
pub struct SessionController {
    connection: ConnectionManager,
    bus: EventBus,
    store: NotificationStore,
    toast_rx: Mutex<Option<mpsc::Receiver<Toast>>>,
    activity_rx: Mutex<Option<mpsc::Receiver<ActivityEvent>>>,
    status_rx: watch::Receiver<SessionStatus>,
    // Held so the routing listeners stay registered for the session's life.
    _subscriptions: Vec<EventSubscription>,
}

impl SessionController {
    /// Build a session against `base_url` with default options.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(
            base_url,
            ConnectionOptions::default(),
            NotifyLinkTimeouts::default(),
        )
    }

    /// Build a session with explicit connection options and timeouts.
    pub fn with_config(
        base_url: impl Into<String>,
        options: ConnectionOptions,
        timeouts: NotifyLinkTimeouts,
    ) -> Result<Self> {
        let bus = EventBus::new();
        let connection = ConnectionManager::new(base_url, options, timeouts, bus.clone())?;
        let store = NotificationStore::new();

        let sender = connection.frame_sender();
        store.set_outbound(move |frame| sender.send(frame));

        let (toast_tx, toast_rx) = mpsc::channel(UI_CHANNEL_CAPACITY);
        let (activity_tx, activity_rx) = mpsc::channel(UI_CHANNEL_CAPACITY);
        let (status_tx, status_rx) = watch::channel(SessionStatus::Offline);

        let mut subscriptions = Vec::new();

        // Store projections
        let s = store.clone();
        subscriptions.push(bus.subscribe(TAG_NOTIFICATION, move |payload| {
            match decode_notification(payload) {
                Some(notification) => s.apply_push(notification),
                None => log::warn!("[notify-link] Dropping malformed notification frame"),
            }
        }));

        let s = store.clone();
        subscriptions.push(bus.subscribe(TAG_BADGE_UPDATE, move |payload| {
            match serde_json::from_value::<BadgeUpdate>(payload.clone()) {
                Ok(update) => s.apply_badge_update(update.unread_count),
                Err(e) => log::warn!("[notify-link] Dropping malformed badge_update frame: {}", e),
            }
        }));

        // Ephemeral UI signals
        subscriptions.push(bus.subscribe(TAG_TOAST, move |payload| {
            match serde_json::from_value::<Toast>(payload.clone()) {
                Ok(toast) => {
                    if toast_tx.try_send(toast).is_err() {
                        log::debug!("[notify-link] Toast channel full, dropping toast");
                    }
                }
                Err(e) => log::warn!("[notify-link] Dropping malformed toast frame: {}", e),
            }
        }));

        for tag in ACTIVITY_TAGS {
            let tx = activity_tx.clone();
            subscriptions.push(bus.subscribe(tag, move |payload| {
                let event = ActivityEvent::new(tag, payload.clone());
                if tx.try_send(event).is_err() {
                    log::debug!("[notify-link] Activity channel full, dropping event");
                }
            }));
        }

        // Connection status for the persistent offline indicator
        let tx = status_tx.clone();
        subscriptions.push(bus.subscribe(EVENT_CONNECTED, move |_| {
            tx.send_replace(SessionStatus::Online);
        }));
        let tx = status_tx.clone();
        subscriptions.push(bus.subscribe(EVENT_DISCONNECTED, move |_| {
            tx.send_replace(SessionStatus::Offline);
        }));
        let tx = status_tx.clone();
        subscriptions.push(bus.subscribe(EVENT_RECONNECT_FAILED, move |_| {
            tx.send_replace(SessionStatus::ReconnectFailed);
        }));
        subscriptions.push(bus.subscribe(EVENT_AUTH_FAILED, move |_| {
            status_tx.send_replace(SessionStatus::AuthRequired);
        }));

        Ok(Self {
            connection,
            bus,
            store,
            toast_rx: Mutex::new(Some(toast_rx)),
            activity_rx: Mutex::new(Some(activity_rx)),
            status_rx,
            _subscriptions: subscriptions,
        })
    }

    /// Sign-in: open the push connection with the user's bearer token.
    pub async fn sign_in(&self, token: impl Into<String>) -> Result<()> {
        self.connection.connect(token).await
    }

    /// Sign-out (or token invalidation): close the connection, cancel any
    /// pending reconnect, and clear all local notification state.
    pub async fn sign_out(&self) {
        self.connection.disconnect().await;
        self.store.reset();
    }

    /// Optimistically mark one notification as read.
    pub fn mark_read(&self, id: &str) -> bool {
        self.store.mark_read_optimistic(id)
    }

    /// Optimistically mark every notification as read.
    pub fn mark_all_read(&self) {
        self.store.mark_all_read_optimistic();
    }

    /// Replace local state with an authoritative snapshot.
    ///
    /// Call this with the result of the REST full-state fetch after
    /// sign-in or after a reconnect to repair any delivery gap.
    pub fn hydrate(&self, notifications: Vec<Notification>, unread_count: u32) {
        self.store.hydrate(notifications, unread_count);
    }

    /// The notification store projection.
    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    /// The event bus, for additional ad-hoc subscribers.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Current connection lifecycle state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Watch channel carrying the coarse session status.
    pub fn status(&self) -> watch::Receiver<SessionStatus> {
        self.status_rx.clone()
    }

    /// Take the toast stream. Yields `None` after the first call.
    pub fn take_toasts(&self) -> Option<mpsc::Receiver<Toast>> {
        self.toast_rx.lock().ok().and_then(|mut guard| guard.take())
    }

    /// Take the team-activity feed stream. Yields `None` after the first
    /// call.
    pub fn take_activity(&self) -> Option<mpsc::Receiver<ActivityEvent>> {
        self.activity_rx
            .lock()
            .ok()
            .and_then(|mut guard| guard.take())
    }
}

/// Decode a `notification` frame. The payload nests the entity under a
/// `notification` key; fall back to the flat shape for older servers.
fn decode_notification(payload: &JsonValue) -> Option<Notification> {
    let body = payload.get("notification").unwrap_or(payload);
    serde_json::from_value(body.clone()).ok()
}
