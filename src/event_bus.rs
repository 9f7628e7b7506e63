//! Typed publish/subscribe registry decoupling the connection manager's
//! inbound frames from independent consumers (stores, UI surfaces).
//!
//! Every inbound frame is republished under its `type` tag; consumers
//! subscribe per tag. Listeners run synchronously, in registration order,
//! and a panicking listener never prevents its siblings from running.

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

/// Listener invoked with the published payload.
pub type Listener = Arc<dyn Fn(&JsonValue) + Send + Sync>;

/// Opaque handle returned by [`EventBus::subscribe`].
///
/// Owned by the subscriber; pass it back to [`EventBus::unsubscribe`] to
/// remove the listener. Removal is idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSubscription {
    event_type: String,
    id: u64,
}

struct Registration {
    id: u64,
    listener: Listener,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    topics: HashMap<String, Vec<Registration>>,
}

/// Shared publish/subscribe bus keyed by event-type tag.
///
/// Cloning is cheap and shares the registry, so the connection manager and
/// its consumers can each hold a handle.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<RwLock<BusInner>>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events published under `event_type`.
    ///
    /// Listeners for a tag are invoked in registration order, once per
    /// publish of that tag.
    pub fn subscribe(
        &self,
        event_type: impl Into<String>,
        listener: impl Fn(&JsonValue) + Send + Sync + 'static,
    ) -> EventSubscription {
        let event_type = event_type.into();
        let mut inner = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .topics
            .entry(event_type.clone())
            .or_default()
            .push(Registration {
                id,
                listener: Arc::new(listener),
            });
        EventSubscription { event_type, id }
    }

    /// Remove a previously registered listener. Idempotent: unsubscribing a
    /// handle twice (or a handle that was never registered) is a no-op.
    pub fn unsubscribe(&self, subscription: &EventSubscription) {
        let mut inner = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(entries) = inner.topics.get_mut(&subscription.event_type) {
            entries.retain(|r| r.id != subscription.id);
            if entries.is_empty() {
                inner.topics.remove(&subscription.event_type);
            }
        }
    }

    /// Publish `payload` to every listener registered for `event_type`.
    ///
    /// Publishing to a tag with no subscribers is a no-op. A panic inside
    /// one listener is caught here, logged, and does not propagate to the
    /// publisher or to sibling listeners.
    pub fn publish(&self, event_type: &str, payload: &JsonValue) {
        // Snapshot listeners so a subscriber can (un)subscribe from inside
        // its callback without deadlocking on the registry lock.
        let listeners: Vec<Listener> = {
            let inner = match self.inner.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            match inner.topics.get(event_type) {
                Some(entries) => entries.iter().map(|r| r.listener.clone()).collect(),
                None => return,
            }
        };

        for listener in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(payload))).is_err() {
                log::warn!(
                    "[notify-link] Listener for '{}' panicked; continuing with remaining listeners",
                    event_type
                );
            }
        }
    }

    /// Number of listeners currently registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        let inner = match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.topics.get(event_type).map_or(0, Vec::len)
    }
}
