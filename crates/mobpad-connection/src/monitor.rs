//! The self-healing socket session.
//!
//! [`ConnectionMonitor`] owns exactly one socket at a time. A periodic
//! health check replaces a closed socket, and one stuck connecting or
//! closing for longer than the configured timeout. Replacement swaps the
//! socket wholesale and bumps its [`Generation`]; events still in flight
//! from an older socket are recognised by their generation and dropped.

use std::fmt;
use std::time::{Duration, Instant};

use mobpad_protocol::{InboundMessage, PayloadCodec};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::config::ConnectionConfig;
use crate::queue::{Enqueued, OutboundQueue};
use crate::socket::{
    EventReceiver, EventSender, Generation, Socket, SocketEvent, SocketFactory, TaggedSocketEvent,
};
use crate::state::{ReadyState, StateClock};

/// Receives decoded inbound messages.
pub trait MessageSubscriber: Send {
    /// Called once per inbound message, in arrival order.
    fn on_message(&mut self, message: &InboundMessage);
}

impl<F> MessageSubscriber for F
where
    F: FnMut(&InboundMessage) + Send,
{
    fn on_message(&mut self, message: &InboundMessage) {
        self(message);
    }
}

/// What [`ConnectionMonitor::send`] did with a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Handed to the open socket
    Sent,
    /// Held until the socket opens
    Queued,
    /// Lost to queue overflow
    Dropped,
}

/// Result of a health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthAction {
    /// Socket is open
    Healthy,
    /// Socket is connecting or closing within the timeout
    Waiting {
        /// Observed state
        state: ReadyState,
        /// Time spent in it
        elapsed: Duration,
    },
    /// Socket was closed and has been replaced
    Reconnected,
    /// Socket was stuck and has been force-closed and replaced
    ForcedReconnect {
        /// State it was stuck in
        state: ReadyState,
    },
}

/// Result of handling one socket event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Event came from a replaced socket and was ignored
    Stale,
    /// Socket opened; queued payloads flushed
    Opened {
        /// Payloads sent from the queue
        drained: usize,
    },
    /// Message decoded and handed to subscribers
    Dispatched {
        /// Subscribers notified
        subscribers: usize,
    },
    /// Message could not be decoded and was dropped
    Rejected,
    /// Transport reported an error
    Errored,
    /// Socket finished closing
    Closed,
}

/// Socket session with health checks, reconnection and an outbound queue.
pub struct ConnectionMonitor<F: SocketFactory> {
    config: ConnectionConfig,
    factory: F,
    socket: F::Socket,
    generation: Generation,
    events_tx: EventSender,
    events_rx: EventReceiver,
    clock: StateClock,
    queue: OutboundQueue,
    codec: PayloadCodec,
    subscribers: Vec<Box<dyn MessageSubscriber>>,
    reconnects: u64,
}

impl<F: SocketFactory> fmt::Debug for ConnectionMonitor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionMonitor")
            .field("url", &self.config.url)
            .field("generation", &self.generation)
            .field("state", &self.socket.ready_state())
            .field("queued", &self.queue.len())
            .field("subscribers", &self.subscribers.len())
            .field("reconnects", &self.reconnects)
            .finish_non_exhaustive()
    }
}

impl<F: SocketFactory> ConnectionMonitor<F> {
    /// Open the first socket.
    ///
    /// Transports that spawn tasks must be created inside a tokio runtime.
    pub fn new(config: ConnectionConfig, mut factory: F) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let generation = Generation::default().next();
        info!(url = %config.url, %generation, "Opening socket");
        let socket = factory.connect(&config.url, generation, events_tx.clone());
        let queue = OutboundQueue::new(config.queue_capacity, config.overflow);
        let codec = PayloadCodec::with_max_size(config.max_message_size);
        Self {
            config,
            factory,
            socket,
            generation,
            events_tx,
            events_rx,
            clock: StateClock::new(Instant::now()),
            queue,
            codec,
            subscribers: Vec::new(),
            reconnects: 0,
        }
    }

    /// Register a subscriber for inbound messages.
    pub fn subscribe(&mut self, subscriber: impl MessageSubscriber + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Send a payload, or queue it while the socket is not open.
    pub fn send(&mut self, payload: impl Into<String>) -> SendOutcome {
        let payload = payload.into();
        let state = self.socket.ready_state();
        if state.is_open() {
            self.drain_queue();
            if self.queue.is_empty() {
                match self.socket.send(&payload) {
                    Ok(()) => return SendOutcome::Sent,
                    Err(e) => warn!(error = %e, "Send failed, queueing payload"),
                }
            }
        } else {
            warn!(%state, queued = self.queue.len(), "Sending to a socket that is not open, queueing");
        }
        self.enqueue(payload)
    }

    fn enqueue(&mut self, payload: String) -> SendOutcome {
        match self.queue.push(payload) {
            Enqueued::Stored => SendOutcome::Queued,
            Enqueued::EvictedOldest => {
                debug!(dropped = self.queue.dropped(), "Outbound queue full, evicted oldest payload");
                SendOutcome::Queued
            }
            Enqueued::Rejected => {
                warn!(dropped = self.queue.dropped(), "Outbound queue full, payload dropped");
                SendOutcome::Dropped
            }
        }
    }

    fn drain_queue(&mut self) -> usize {
        let mut drained = 0;
        while let Some(payload) = self.queue.pop() {
            if let Err(e) = self.socket.send(&payload) {
                warn!(error = %e, remaining = self.queue.len() + 1, "Queue drain interrupted");
                self.queue.requeue_front(payload);
                break;
            }
            drained += 1;
        }
        drained
    }

    /// Run a health check now.
    pub fn check_connection(&mut self) -> HealthAction {
        self.check_connection_at(Instant::now())
    }

    /// Run a health check as of `now`.
    pub fn check_connection_at(&mut self, now: Instant) -> HealthAction {
        let state = self.socket.ready_state();
        let elapsed = self.clock.observe(state, now);
        match state {
            ReadyState::Open => HealthAction::Healthy,
            ReadyState::Closed => {
                warn!(generation = %self.generation, "Socket closed, reconnecting");
                self.reconnect(now);
                HealthAction::Reconnected
            }
            ReadyState::Connecting | ReadyState::Closing if elapsed > self.config.stuck_timeout() => {
                warn!(%state, ?elapsed, "Socket stuck, forcing reconnect");
                self.socket.close();
                self.reconnect(now);
                HealthAction::ForcedReconnect { state }
            }
            ReadyState::Connecting | ReadyState::Closing => {
                debug!(%state, ?elapsed, "Socket transitioning");
                HealthAction::Waiting { state, elapsed }
            }
        }
    }

    fn reconnect(&mut self, now: Instant) {
        self.generation = self.generation.next();
        self.reconnects = self.reconnects.saturating_add(1);
        self.socket = self
            .factory
            .connect(&self.config.url, self.generation, self.events_tx.clone());
        self.clock.reset(now);
        info!(generation = %self.generation, reconnects = self.reconnects, "Socket replaced");
    }

    /// Wait for the next socket event.
    pub async fn next_event(&mut self) -> Option<TaggedSocketEvent> {
        self.events_rx.recv().await
    }

    /// Take an already delivered socket event without waiting.
    pub fn try_next_event(&mut self) -> Option<TaggedSocketEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Handle every event already delivered, returning how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.try_next_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Apply one socket event.
    pub fn handle_event(&mut self, tagged: TaggedSocketEvent) -> EventOutcome {
        if tagged.generation != self.generation {
            trace!(
                stale = %tagged.generation,
                current = %self.generation,
                "Dropping event from replaced socket"
            );
            return EventOutcome::Stale;
        }
        match tagged.event {
            SocketEvent::Open => {
                let drained = self.drain_queue();
                info!(generation = %self.generation, drained, "Socket opened");
                EventOutcome::Opened { drained }
            }
            SocketEvent::Message(text) => self.dispatch(&text),
            SocketEvent::Error(reason) => {
                warn!(generation = %self.generation, %reason, "Socket error");
                EventOutcome::Errored
            }
            SocketEvent::Close => {
                info!(generation = %self.generation, "Socket closed");
                EventOutcome::Closed
            }
        }
    }

    fn dispatch(&mut self, text: &str) -> EventOutcome {
        match self.codec.decode(text) {
            Ok(message) => {
                for subscriber in &mut self.subscribers {
                    subscriber.on_message(&message);
                }
                EventOutcome::Dispatched {
                    subscribers: self.subscribers.len(),
                }
            }
            Err(e) => {
                warn!(error = %e, "Dropping malformed inbound message");
                EventOutcome::Rejected
            }
        }
    }

    /// Close the current socket.
    pub fn close(&mut self) {
        self.socket.close();
    }

    /// Current socket state.
    pub fn state(&self) -> ReadyState {
        self.socket.ready_state()
    }

    /// Generation of the current socket.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Number of times the socket has been replaced.
    pub fn reconnect_count(&self) -> u64 {
        self.reconnects
    }

    /// Payloads waiting for an open socket.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Payloads lost to queue overflow.
    pub fn dropped(&self) -> u64 {
        self.queue.dropped()
    }

    /// The settings in use.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}
