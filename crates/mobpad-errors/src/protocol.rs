//! Wire payload errors.

use crate::common::ErrorSeverity;

/// Errors raised while encoding outbound payloads or decoding inbound ones.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// Inbound text was not valid JSON
    #[error("Malformed message: {0}")]
    MalformedJson(String),

    /// Inbound object carried no `type`, `header` or `__type__` tag
    #[error("Message has no type tag")]
    MissingType,

    /// Inbound data did not match the shape expected for its type
    #[error("Invalid '{kind}' payload: {reason}")]
    InvalidPayload {
        /// Message type tag
        kind: String,
        /// What was wrong with it
        reason: String,
    },

    /// Message exceeds the codec's size limit
    #[error("Message size {size} exceeds maximum {max}")]
    MessageTooLarge {
        /// Message size in bytes
        size: usize,
        /// Maximum accepted size in bytes
        max: usize,
    },

    /// Outbound serialization failed
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

impl ProtocolError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProtocolError::MalformedJson(_) => ErrorSeverity::Warning,
            ProtocolError::MissingType => ErrorSeverity::Warning,
            ProtocolError::InvalidPayload { .. } => ErrorSeverity::Warning,
            ProtocolError::MessageTooLarge { .. } => ErrorSeverity::Warning,
            ProtocolError::Encoding(_) => ErrorSeverity::Error,
        }
    }

    /// Create an invalid payload error.
    pub fn invalid_payload(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        ProtocolError::InvalidPayload {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}
