//! Connection tuning.

use std::time::Duration;

use mobpad_errors::ConnectionError;
use mobpad_protocol::DEFAULT_MAX_MESSAGE_SIZE;
use serde::{Deserialize, Serialize};

use crate::queue::OverflowPolicy;

/// Default host endpoint.
pub const DEFAULT_URL: &str = "ws://localhost/mobcontrol/";

/// Default interval between health checks, in milliseconds.
pub const DEFAULT_CHECK_INTERVAL_MS: u64 = 2_000;

/// Default delay before the first health check, in milliseconds.
pub const DEFAULT_FIRST_CHECK_DELAY_MS: u64 = 5_000;

/// Default time a socket may stay connecting or closing, in milliseconds.
pub const DEFAULT_STUCK_TIMEOUT_MS: u64 = 10_000;

/// Default outbound queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Settings for a [`ConnectionMonitor`](crate::ConnectionMonitor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Websocket endpoint of the host
    pub url: String,
    /// Interval between health checks
    pub check_interval_ms: u64,
    /// Delay before the first health check
    pub first_check_delay_ms: u64,
    /// Time a socket may stay connecting or closing before it is replaced
    pub stuck_timeout_ms: u64,
    /// Payloads held while the socket is not open
    pub queue_capacity: usize,
    /// Which payload to discard when the queue is full
    pub overflow: OverflowPolicy,
    /// Largest inbound message accepted, in bytes
    pub max_message_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            check_interval_ms: DEFAULT_CHECK_INTERVAL_MS,
            first_check_delay_ms: DEFAULT_FIRST_CHECK_DELAY_MS,
            stuck_timeout_ms: DEFAULT_STUCK_TIMEOUT_MS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow: OverflowPolicy::DropOldest,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl ConnectionConfig {
    /// Default settings pointed at `url`.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the outbound queue size and overflow policy.
    #[must_use]
    pub fn with_queue(mut self, capacity: usize, overflow: OverflowPolicy) -> Self {
        self.queue_capacity = capacity;
        self.overflow = overflow;
        self
    }

    /// Set the stuck-socket timeout.
    #[must_use]
    pub fn with_stuck_timeout(mut self, timeout: Duration) -> Self {
        self.stuck_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Health check interval.
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    /// Delay before the first health check.
    pub fn first_check_delay(&self) -> Duration {
        Duration::from_millis(self.first_check_delay_ms)
    }

    /// Stuck-socket timeout.
    pub fn stuck_timeout(&self) -> Duration {
        Duration::from_millis(self.stuck_timeout_ms)
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::InvalidUrl`] unless the url is a `ws://` or
    /// `wss://` address with a host.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        let rest = self
            .url
            .strip_prefix("ws://")
            .or_else(|| self.url.strip_prefix("wss://"));
        match rest {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(()),
            _ => Err(ConnectionError::InvalidUrl(self.url.clone())),
        }
    }
}
