//! A scriptable in-memory socket.
//!
//! [`MockSocketFactory`] records every socket it opens. Tests keep a clone
//! of the factory and drive each socket through its [`MockSocketHandle`]:
//! change the reported state, deliver frames, and inspect what was sent.

use std::sync::Arc;

use mobpad_connection::{
    EventSender, Generation, ReadyState, Socket, SocketEvent, SocketFactory, emit,
};
use mobpad_errors::ConnectionError;
use parking_lot::Mutex;

#[derive(Debug)]
struct MockSocketShared {
    state: ReadyState,
    sent: Vec<String>,
    close_calls: usize,
    fail_sends: bool,
}

/// Test-side control of one mock socket.
#[derive(Debug, Clone)]
pub struct MockSocketHandle {
    generation: Generation,
    url: String,
    shared: Arc<Mutex<MockSocketShared>>,
    events: EventSender,
}

impl MockSocketHandle {
    /// Generation the monitor assigned this socket.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Url the socket was opened with.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// State the socket reports.
    pub fn state(&self) -> ReadyState {
        self.shared.lock().state
    }

    /// Change the reported state without raising an event.
    pub fn set_state(&self, state: ReadyState) {
        self.shared.lock().state = state;
    }

    /// Payloads the monitor sent through this socket.
    pub fn sent(&self) -> Vec<String> {
        self.shared.lock().sent.clone()
    }

    /// How many times the monitor closed this socket.
    pub fn close_calls(&self) -> usize {
        self.shared.lock().close_calls
    }

    /// Make every send fail.
    pub fn fail_sends(&self, fail: bool) {
        self.shared.lock().fail_sends = fail;
    }

    /// Raise an event tagged with this socket's generation.
    pub fn emit(&self, event: SocketEvent) -> bool {
        emit(&self.events, self.generation, event)
    }

    /// Complete the handshake.
    pub fn open(&self) -> bool {
        self.set_state(ReadyState::Open);
        self.emit(SocketEvent::Open)
    }

    /// Deliver a text frame.
    pub fn receive(&self, text: impl Into<String>) -> bool {
        self.emit(SocketEvent::Message(text.into()))
    }

    /// Simulate the peer going away.
    pub fn drop_connection(&self) -> bool {
        self.set_state(ReadyState::Closed);
        self.emit(SocketEvent::Close)
    }
}

/// Socket half handed to the monitor.
#[derive(Debug)]
pub struct MockSocket {
    shared: Arc<Mutex<MockSocketShared>>,
}

impl Socket for MockSocket {
    fn ready_state(&self) -> ReadyState {
        self.shared.lock().state
    }

    fn send(&mut self, payload: &str) -> Result<(), ConnectionError> {
        let mut shared = self.shared.lock();
        if shared.fail_sends {
            return Err(ConnectionError::SendFailed("mock send failure".to_string()));
        }
        if shared.state != ReadyState::Open {
            return Err(ConnectionError::SocketClosed);
        }
        shared.sent.push(payload.to_owned());
        Ok(())
    }

    fn close(&mut self) {
        let mut shared = self.shared.lock();
        shared.close_calls += 1;
        shared.state = ReadyState::Closed;
    }
}

/// Factory recording every socket it opens.
#[derive(Debug, Clone)]
pub struct MockSocketFactory {
    sockets: Arc<Mutex<Vec<MockSocketHandle>>>,
    initial_state: ReadyState,
}

impl MockSocketFactory {
    /// Sockets start out connecting.
    pub fn new() -> Self {
        Self::with_initial_state(ReadyState::Connecting)
    }

    /// Sockets start out in `state`.
    pub fn with_initial_state(state: ReadyState) -> Self {
        Self {
            sockets: Arc::new(Mutex::new(Vec::new())),
            initial_state: state,
        }
    }

    /// Number of sockets opened so far.
    pub fn connections(&self) -> usize {
        self.sockets.lock().len()
    }

    /// Handle of the `index`th socket opened.
    pub fn socket(&self, index: usize) -> Option<MockSocketHandle> {
        self.sockets.lock().get(index).cloned()
    }

    /// Handle of the most recently opened socket.
    pub fn latest(&self) -> Option<MockSocketHandle> {
        self.sockets.lock().last().cloned()
    }
}

impl Default for MockSocketFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SocketFactory for MockSocketFactory {
    type Socket = MockSocket;

    fn connect(&mut self, url: &str, generation: Generation, events: EventSender) -> MockSocket {
        let shared = Arc::new(Mutex::new(MockSocketShared {
            state: self.initial_state,
            sent: Vec::new(),
            close_calls: 0,
            fail_sends: false,
        }));
        self.sockets.lock().push(MockSocketHandle {
            generation,
            url: url.to_owned(),
            shared: Arc::clone(&shared),
            events,
        });
        MockSocket { shared }
    }
}
