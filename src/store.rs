//! In-memory projection of notifications and the unread badge.
//!
//! The store is the authoritative local view: server pushes are applied as-is
//! (server wins), user actions are applied optimistically and reconciled by
//! later pushes or by a full re-hydration after a reconnect.

use crate::error::Result;
use crate::models::{ClientFrame, Notification};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Outbound hook used to emit read-confirmation frames.
///
/// Wired to [`FrameSender::send`](crate::connection::FrameSender::send) in
/// production; tests inject a capturing closure instead.
pub type OutboundHook = Arc<dyn Fn(ClientFrame) -> Result<()> + Send + Sync>;

/// Snapshot of the unread badge.
///
/// The displayed value is `server_count + pending_delta`, never negative.
/// `pending_delta` only exists to mask the round-trip latency of in-flight
/// `mark_read` actions; a `badge_update` push reconciles it back to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnreadBadge {
    /// Last authoritative count pushed by the server.
    pub server_count: u32,
    /// Net local adjustment from unconfirmed optimistic mutations.
    pub pending_delta: i64,
}

impl UnreadBadge {
    /// The count shown to the user.
    pub fn displayed(&self) -> u32 {
        (self.server_count as i64 + self.pending_delta).max(0) as u32
    }
}

#[derive(Default)]
struct StoreInner {
    notifications: HashMap<String, Notification>,
    badge: UnreadBadge,
}

/// The authoritative in-memory notification state for one session.
///
/// Cloning shares the underlying state; the session controller and any bus
/// listeners hold clones. All mutation goes through this type — there is no
/// second writer.
#[derive(Clone, Default)]
pub struct NotificationStore {
    inner: Arc<RwLock<StoreInner>>,
    outbound: Arc<RwLock<Option<OutboundHook>>>,
}

impl NotificationStore {
    /// Create an empty store with no outbound hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the hook used to emit `mark_read` frames.
    pub fn set_outbound(&self, hook: impl Fn(ClientFrame) -> Result<()> + Send + Sync + 'static) {
        if let Ok(mut guard) = self.outbound.write() {
            *guard = Some(Arc::new(hook));
        }
    }

    /// Upsert one server-pushed notification by `id`.
    ///
    /// The incoming copy wins for all fields, including `is_read`: the server
    /// is the source of truth, and this is what reconciles any optimistic
    /// mutation whose round trip was lost. Applying the same payload twice is
    /// a no-op.
    pub fn apply_push(&self, notification: Notification) {
        let mut inner = self.write();
        inner
            .notifications
            .insert(notification.id.clone(), notification);
    }

    /// Apply an authoritative unread-count push.
    ///
    /// A badge push is the server confirming (or rejecting) whatever
    /// optimistic mutations were in flight, so `pending_delta` is reconciled
    /// to 0 — it must never be left to drift.
    pub fn apply_badge_update(&self, server_count: u32) {
        let mut inner = self.write();
        inner.badge.server_count = server_count;
        inner.badge.pending_delta = 0;
    }

    /// Optimistically mark one notification as read.
    ///
    /// If the notification exists and is unread: flips it locally, adjusts
    /// the badge (clamped so the displayed count never goes negative), and
    /// emits a `mark_read` frame through the outbound hook. Returns whether
    /// anything changed. The local flip is provisional until a later server
    /// push confirms it.
    pub fn mark_read_optimistic(&self, id: &str) -> bool {
        let changed = {
            let mut inner = self.write();
            match inner.notifications.get_mut(id) {
                Some(n) if !n.is_read => {
                    n.is_read = true;
                    let floor = -(inner.badge.server_count as i64);
                    inner.badge.pending_delta = (inner.badge.pending_delta - 1).max(floor);
                    true
                }
                _ => false,
            }
        };

        if changed {
            self.emit(ClientFrame::MarkRead {
                notification_id: id.to_string(),
            });
        }
        changed
    }

    /// Optimistically mark every unread notification as read.
    ///
    /// Applies [`mark_read_optimistic`](Self::mark_read_optimistic) semantics
    /// to each unread entry; the displayed badge lands at 0 and stays there
    /// until the server's `badge_update` confirms.
    pub fn mark_all_read_optimistic(&self) {
        let ids: Vec<String> = {
            let inner = self.read();
            inner
                .notifications
                .values()
                .filter(|n| !n.is_read)
                .map(|n| n.id.clone())
                .collect()
        };
        for id in &ids {
            self.mark_read_optimistic(id);
        }
        // Every entry is read now; pin the displayed count at zero even if
        // the server counted unreads this client never received.
        let mut inner = self.write();
        inner.badge.pending_delta = -(inner.badge.server_count as i64);
    }

    /// Clear all notifications and zero the badge. Called on session
    /// teardown.
    pub fn reset(&self) {
        let mut inner = self.write();
        inner.notifications.clear();
        inner.badge = UnreadBadge::default();
    }

    /// Replace local state with a freshly fetched authoritative snapshot.
    ///
    /// This is the reconciliation hook used after a reconnect: the external
    /// REST collaborator fetches full state and hands it here, repairing any
    /// gap in the at-most-once delivery window.
    pub fn hydrate(&self, notifications: Vec<Notification>, server_count: u32) {
        let mut inner = self.write();
        inner.notifications.clear();
        for notification in notifications {
            inner
                .notifications
                .insert(notification.id.clone(), notification);
        }
        inner.badge = UnreadBadge {
            server_count,
            pending_delta: 0,
        };
    }

    /// All notifications, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        let inner = self.read();
        let mut all: Vec<Notification> = inner.notifications.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        all
    }

    /// Look up one notification by id.
    pub fn get(&self, id: &str) -> Option<Notification> {
        self.read().notifications.get(id).cloned()
    }

    /// Current badge snapshot.
    pub fn badge(&self) -> UnreadBadge {
        self.read().badge
    }

    /// The unread count shown to the user.
    pub fn unread_count(&self) -> u32 {
        self.read().badge.displayed()
    }

    /// Number of notifications held.
    pub fn len(&self) -> usize {
        self.read().notifications.len()
    }

    /// Whether the store holds no notifications.
    pub fn is_empty(&self) -> bool {
        self.read().notifications.is_empty()
    }

    fn emit(&self, frame: ClientFrame) {
        let hook = match self.outbound.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if let Some(hook) = hook {
            if let Err(e) = hook(frame) {
                // Not an error for the store: the next full-state
                // reconciliation corrects any drift.
                log::debug!("[notify-link] mark_read frame not sent: {}", e);
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreInner> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreInner> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    fn notification(id: &str, is_read: bool, minute: u32) -> Notification {
        Notification {
            id: id.to_string(),
            kind: "team_activity".to_string(),
            title: format!("notification {}", id),
            body: String::new(),
            metadata: HashMap::new(),
            is_read,
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 10, minute, 0).unwrap(),
        }
    }

    fn capturing_store() -> (NotificationStore, Arc<Mutex<Vec<ClientFrame>>>) {
        let store = NotificationStore::new();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = sent.clone();
        store.set_outbound(move |frame| {
            sink.lock().unwrap().push(frame);
            Ok(())
        });
        (store, sent)
    }

    #[test]
    fn test_apply_push_upserts_by_id() {
        let store = NotificationStore::new();
        store.apply_push(notification("n1", false, 0));
        store.apply_push(notification("n2", false, 1));
        assert_eq!(store.len(), 2);

        let mut updated = notification("n1", false, 0);
        updated.title = "edited".to_string();
        store.apply_push(updated);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("n1").unwrap().title, "edited");
    }

    #[test]
    fn test_apply_push_is_idempotent() {
        let store = NotificationStore::new();
        store.apply_push(notification("n1", false, 0));
        let before = store.notifications();
        store.apply_push(notification("n1", false, 0));
        assert_eq!(store.notifications(), before);
    }

    #[test]
    fn test_server_push_wins_read_state() {
        let (store, _) = capturing_store();
        store.apply_push(notification("n1", false, 0));
        store.mark_read_optimistic("n1");
        assert!(store.get("n1").unwrap().is_read);

        // Server re-pushes the notification as unread (e.g. the mark_read
        // round trip was lost): server wins.
        store.apply_push(notification("n1", false, 0));
        assert!(!store.get("n1").unwrap().is_read);
    }

    #[test]
    fn test_badge_update_sets_count_and_reconciles_delta() {
        let (store, _) = capturing_store();
        store.apply_push(notification("n1", false, 0));
        store.apply_badge_update(3);
        assert_eq!(store.unread_count(), 3);

        store.mark_read_optimistic("n1");
        assert_eq!(store.unread_count(), 2);

        store.apply_badge_update(2);
        assert_eq!(store.unread_count(), 2);
        assert_eq!(store.badge().pending_delta, 0);
    }

    #[test]
    fn test_mark_read_applies_immediately_and_emits_frame() {
        let (store, sent) = capturing_store();
        store.apply_push(notification("7", false, 0));
        store.apply_badge_update(3);

        assert!(store.mark_read_optimistic("7"));
        // Badge drops before any server round trip.
        assert_eq!(store.unread_count(), 2);
        assert_eq!(
            sent.lock().unwrap().as_slice(),
            &[ClientFrame::MarkRead {
                notification_id: "7".to_string()
            }]
        );
    }

    #[test]
    fn test_mark_read_noop_for_missing_or_read() {
        let (store, sent) = capturing_store();
        store.apply_push(notification("n1", true, 0));

        assert!(!store.mark_read_optimistic("n1"));
        assert!(!store.mark_read_optimistic("ghost"));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_badge_never_negative() {
        let (store, _) = capturing_store();
        for i in 0..5 {
            store.apply_push(notification(&format!("n{}", i), false, i));
        }
        // Server thinks only 2 are unread; marking all 5 must not underflow.
        store.apply_badge_update(2);
        for i in 0..5 {
            store.mark_read_optimistic(&format!("n{}", i));
            assert!(store.unread_count() <= 2);
        }
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_mark_all_read_zeros_badge_and_emits_per_notification() {
        let (store, sent) = capturing_store();
        store.apply_push(notification("a", false, 0));
        store.apply_push(notification("b", false, 1));
        store.apply_push(notification("c", true, 2));
        store.apply_badge_update(4);

        store.mark_all_read_optimistic();
        assert_eq!(store.unread_count(), 0);
        assert!(store.notifications().iter().all(|n| n.is_read));
        assert_eq!(sent.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let (store, _) = capturing_store();
        store.apply_push(notification("n1", false, 0));
        store.apply_badge_update(5);
        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.badge(), UnreadBadge::default());
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_hydrate_replaces_state() {
        let (store, _) = capturing_store();
        store.apply_push(notification("stale", false, 0));
        store.mark_read_optimistic("stale");

        store.hydrate(
            vec![notification("n1", false, 1), notification("n2", true, 2)],
            1,
        );
        assert_eq!(store.len(), 2);
        assert!(store.get("stale").is_none());
        assert_eq!(store.unread_count(), 1);
        assert_eq!(store.badge().pending_delta, 0);
    }

    #[test]
    fn test_notifications_sorted_newest_first() {
        let store = NotificationStore::new();
        store.apply_push(notification("old", false, 0));
        store.apply_push(notification("new", false, 30));
        store.apply_push(notification("mid", false, 15));

        let ids: Vec<String> = store.notifications().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_send_failure_keeps_local_state() {
        let store = NotificationStore::new();
        store.set_outbound(|_| Err(crate::error::NotifyLinkError::NotConnected));
        store.apply_push(notification("n1", false, 0));
        store.apply_badge_update(1);

        // The frame is dropped, the optimistic flip stays; the next
        // hydration reconciles.
        assert!(store.mark_read_optimistic("n1"));
        assert!(store.get("n1").unwrap().is_read);
        assert_eq!(store.unread_count(), 0);
    }
}
