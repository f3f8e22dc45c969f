//! Common imports for producing and consuming wire payloads.

pub use crate::codec::PayloadCodec;
pub use crate::gate::PayloadGate;
pub use crate::inbound::{InboundCommand, InboundMessage, RumbleCommand};
pub use crate::settings::{PlayerColour, SettingsMessage};
pub use mobpad_errors::ProtocolError;
