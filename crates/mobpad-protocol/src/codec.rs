//! JSON text encoding for outbound payloads and decoding for inbound ones.

use mobpad_errors::ProtocolError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::trace;

use crate::inbound::InboundMessage;

/// Default limit on a single message, in bytes.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

const INDENT: &[u8] = b"    ";

/// Message codec with a size limit applied in both directions.
#[derive(Debug, Clone, Copy)]
pub struct PayloadCodec {
    max_message_size: usize,
}

impl PayloadCodec {
    /// Create a codec with the default size limit.
    pub fn new() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }

    /// Create a codec with a custom size limit.
    pub fn with_max_size(max_message_size: usize) -> Self {
        Self { max_message_size }
    }

    /// Get the maximum message size.
    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    fn check_size(&self, size: usize) -> Result<(), ProtocolError> {
        if size > self.max_message_size {
            return Err(ProtocolError::MessageTooLarge {
                size,
                max: self.max_message_size,
            });
        }
        Ok(())
    }

    /// Encode a value as JSON pretty-printed with four-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Encoding`] if serialization fails and
    /// [`ProtocolError::MessageTooLarge`] if the text exceeds the limit.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ProtocolError> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        value
            .serialize(&mut serializer)
            .map_err(|e| ProtocolError::Encoding(e.to_string()))?;
        self.check_size(buffer.len())?;
        String::from_utf8(buffer).map_err(|e| ProtocolError::Encoding(e.to_string()))
    }

    /// Decode an inbound text frame into its `{type, data}` envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MessageTooLarge`], [`ProtocolError::MalformedJson`]
    /// or [`ProtocolError::MissingType`].
    pub fn decode(&self, text: &str) -> Result<InboundMessage, ProtocolError> {
        self.check_size(text.len())?;
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ProtocolError::MalformedJson(e.to_string()))?;
        let message = InboundMessage::from_value(value)?;
        trace!(kind = message.kind(), "Decoded inbound message");
        Ok(message)
    }
}

impl Default for PayloadCodec {
    fn default() -> Self {
        Self::new()
    }
}
