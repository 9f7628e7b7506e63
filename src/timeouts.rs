//! Timeout configuration for the push connection.
//!
//! Centralizes the handshake and liveness windows used by the connection
//! manager. Reconnection timing lives in
//! [`ConnectionOptions`](crate::models::ConnectionOptions) instead.

use std::time::Duration;

/// Timeout configuration for the push connection.
///
/// All values have sensible defaults; use the builder for custom setups.
///
/// # Examples
///
/// ```rust
/// use notify_link::NotifyLinkTimeouts;
/// use std::time::Duration;
///
/// // Use defaults (recommended for most cases)
/// let timeouts = NotifyLinkTimeouts::default();
///
/// // Custom windows for high-latency environments
/// let timeouts = NotifyLinkTimeouts::builder()
///     .connection_timeout(Duration::from_secs(30))
///     .heartbeat_interval(Duration::from_secs(60))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct NotifyLinkTimeouts {
    /// Timeout for establishing the connection (TCP + TLS + WS handshake).
    /// Default: 10 seconds.
    pub connection_timeout: Duration,

    /// Interval of inbound silence after which a heartbeat `ping` frame is
    /// sent. Set to 0 to disable heartbeats. Default: 30 seconds.
    pub heartbeat_interval: Duration,

    /// Maximum time to wait for any inbound frame (typically the `pong`)
    /// after sending a heartbeat ping. Expiry is treated as an abnormal
    /// close and goes through the reconnect policy. Set to 0 to rely solely
    /// on transport-level close/error events. Default: 10 seconds.
    pub pong_timeout: Duration,
}

impl Default for NotifyLinkTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            heartbeat_interval: Duration::from_secs(30),
            pong_timeout: Duration::from_secs(10),
        }
    }
}

impl NotifyLinkTimeouts {
    /// Create a new builder for custom timeout configuration.
    pub fn builder() -> NotifyLinkTimeoutsBuilder {
        NotifyLinkTimeoutsBuilder::new()
    }

    /// Timeouts optimized for fast local development and tests.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            heartbeat_interval: Duration::from_secs(5),
            pong_timeout: Duration::from_secs(2),
        }
    }

    /// Check if a duration represents "no timeout" (zero or absurdly large).
    pub fn is_no_timeout(duration: Duration) -> bool {
        duration.is_zero() || duration > Duration::from_secs(86400 * 365)
    }
}

/// Builder for [`NotifyLinkTimeouts`].
#[derive(Debug, Clone)]
pub struct NotifyLinkTimeoutsBuilder {
    timeouts: NotifyLinkTimeouts,
}

impl NotifyLinkTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: NotifyLinkTimeouts::default(),
        }
    }

    /// Set the connection establishment timeout.
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connection_timeout = timeout;
        self
    }

    /// Set the heartbeat ping interval. Set to 0 to disable heartbeats.
    pub fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.timeouts.heartbeat_interval = interval;
        self
    }

    /// Set the pong watchdog window. Set to 0 to disable the watchdog.
    pub fn pong_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.pong_timeout = timeout;
        self
    }

    /// Build the timeout configuration.
    pub fn build(self) -> NotifyLinkTimeouts {
        self.timeouts
    }
}
