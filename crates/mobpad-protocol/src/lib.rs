//! Wire payloads for the MobPad client
//!
//! - [`codec`]: four-space pretty JSON encoding and size-limited decoding
//! - [`gate`]: drops a payload identical to the previous one
//! - [`inbound`]: the `{type, data}` envelope and rumble commands
//! - [`settings`]: player name and colour messages
//!
//! # Example
//!
//! ```
//! use mobpad_protocol::prelude::*;
//! use mobpad_input::{FieldMap, FieldValue};
//!
//! let codec = PayloadCodec::new();
//! let mut gate = PayloadGate::new();
//!
//! let mut delta = FieldMap::new();
//! delta.insert("BUTTON_A".into(), FieldValue::Bool(true));
//!
//! let text = codec.encode(&delta)?;
//! assert!(gate.admit(text.clone()).is_some());
//! assert!(gate.admit(text).is_none());
//! # Ok::<(), mobpad_errors::ProtocolError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod codec;
pub mod gate;
pub mod inbound;
pub mod prelude;
pub mod settings;

pub use codec::{DEFAULT_MAX_MESSAGE_SIZE, PayloadCodec};
pub use gate::PayloadGate;
pub use inbound::{InboundCommand, InboundMessage, RumbleCommand};
pub use settings::{PlayerColour, SettingsMessage};
