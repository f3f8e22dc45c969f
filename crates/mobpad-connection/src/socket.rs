//! The socket seam: what the monitor needs from a transport.

use std::fmt;

use mobpad_errors::ConnectionError;
use tokio::sync::mpsc;

use crate::state::ReadyState;

/// Identifies one socket instance. Each reconnect gets the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation after this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Something that happened on a socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// Handshake completed
    Open,
    /// Text frame received
    Message(String),
    /// Transport error
    Error(String),
    /// Socket finished closing
    Close,
}

/// A socket event stamped with the generation of the socket that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSocketEvent {
    /// Socket that raised the event
    pub generation: Generation,
    /// The event
    pub event: SocketEvent,
}

/// Channel sockets report their events on.
pub type EventSender = mpsc::UnboundedSender<TaggedSocketEvent>;

/// Receiving end of [`EventSender`].
pub type EventReceiver = mpsc::UnboundedReceiver<TaggedSocketEvent>;

/// Report an event, returning `false` once the receiver is gone.
pub fn emit(events: &EventSender, generation: Generation, event: SocketEvent) -> bool {
    events.send(TaggedSocketEvent { generation, event }).is_ok()
}

/// A live socket.
pub trait Socket: Send {
    /// Current state.
    fn ready_state(&self) -> ReadyState;

    /// Send a text payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectionError`] if the transport refused the payload.
    fn send(&mut self, payload: &str) -> Result<(), ConnectionError>;

    /// Begin closing. Further events may still arrive.
    fn close(&mut self);
}

/// Opens sockets.
///
/// Opening never fails synchronously: a socket that cannot connect reports
/// [`SocketEvent::Error`] and settles in [`ReadyState::Closed`].
pub trait SocketFactory: Send {
    /// The socket type produced.
    type Socket: Socket;

    /// Start connecting to `url`, reporting events tagged with `generation`.
    fn connect(&mut self, url: &str, generation: Generation, events: EventSender) -> Self::Socket;
}
