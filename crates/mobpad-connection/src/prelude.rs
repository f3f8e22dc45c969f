//! Common imports for running a connection.

pub use crate::config::ConnectionConfig;
pub use crate::monitor::{ConnectionMonitor, EventOutcome, HealthAction, MessageSubscriber, SendOutcome};
pub use crate::queue::OverflowPolicy;
pub use crate::socket::{Generation, Socket, SocketEvent, SocketFactory, TaggedSocketEvent};
pub use crate::state::ReadyState;
pub use crate::ws::WsSocketFactory;
pub use mobpad_errors::ConnectionError;
pub use mobpad_protocol::InboundMessage;
