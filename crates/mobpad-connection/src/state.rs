//! Socket ready states and time-in-state tracking.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// State reported by the underlying socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReadyState {
    /// Handshake in progress
    Connecting = 0,
    /// Ready to send
    Open = 1,
    /// Close handshake in progress
    Closing = 2,
    /// Gone
    Closed = 3,
}

impl ReadyState {
    /// Whether payloads can be sent.
    pub fn is_open(&self) -> bool {
        matches!(self, ReadyState::Open)
    }

    /// Whether the socket is between stable states.
    pub fn is_transitioning(&self) -> bool {
        matches!(self, ReadyState::Connecting | ReadyState::Closing)
    }

    /// Decode the `repr(u8)` value, used for atomic storage.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ReadyState::Connecting),
            1 => Some(ReadyState::Open),
            2 => Some(ReadyState::Closing),
            3 => Some(ReadyState::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadyState::Connecting => write!(f, "CONNECTING"),
            ReadyState::Open => write!(f, "OPEN"),
            ReadyState::Closing => write!(f, "CLOSING"),
            ReadyState::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Tracks how long the socket has reported the same state.
///
/// The clock only restarts when the observed state changes, which is what
/// separates a stuck handshake from one that is merely in progress.
#[derive(Debug, Clone, Copy)]
pub struct StateClock {
    state: Option<ReadyState>,
    since: Instant,
}

impl StateClock {
    /// A clock that has observed nothing yet.
    pub fn new(now: Instant) -> Self {
        Self { state: None, since: now }
    }

    /// Record the current state, returning how long it has held.
    pub fn observe(&mut self, state: ReadyState, now: Instant) -> Duration {
        if self.state != Some(state) {
            self.state = Some(state);
            self.since = now;
        }
        now.saturating_duration_since(self.since)
    }

    /// Forget the observed state, as after replacing the socket.
    pub fn reset(&mut self, now: Instant) {
        self.state = None;
        self.since = now;
    }

    /// The last observed state.
    pub fn state(&self) -> Option<ReadyState> {
        self.state
    }
}
