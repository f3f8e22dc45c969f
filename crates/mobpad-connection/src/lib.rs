//! Socket session management for the MobPad client
//!
//! The [`ConnectionMonitor`] keeps one socket to the host alive: it replaces
//! closed or stuck sockets on a periodic health check, queues outbound
//! payloads while the socket is not open, and fans inbound messages out to
//! subscribers.
//!
//! The transport sits behind the [`Socket`]/[`SocketFactory`] seam.
//! [`WsSocketFactory`] is the websocket implementation.
//!
//! # Example
//!
//! ```no_run
//! use mobpad_connection::prelude::*;
//!
//! # async fn run() {
//! let config = ConnectionConfig::with_url("ws://192.168.1.20/mobcontrol/");
//! let mut monitor = ConnectionMonitor::new(config, WsSocketFactory);
//! monitor.subscribe(|message: &InboundMessage| println!("{}", message.kind()));
//! monitor.send("{}");
//!
//! while let Some(event) = monitor.next_event().await {
//!     monitor.handle_event(event);
//! }
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod monitor;
pub mod prelude;
pub mod queue;
pub mod socket;
pub mod state;
pub mod ws;

pub use config::ConnectionConfig;
pub use monitor::{ConnectionMonitor, EventOutcome, HealthAction, MessageSubscriber, SendOutcome};
pub use queue::{Enqueued, OutboundQueue, OverflowPolicy};
pub use socket::{
    EventReceiver, EventSender, Generation, Socket, SocketEvent, SocketFactory, TaggedSocketEvent, emit,
};
pub use state::{ReadyState, StateClock};
pub use ws::{WsSocket, WsSocketFactory};
