//! Socket and transport errors.

use crate::common::ErrorSeverity;

/// Errors raised by the socket seam.
///
/// None of these is fatal to the client: the connection monitor recovers by
/// reconstructing the socket, and callers only observe a socket that is
/// momentarily unavailable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The socket could not be created
    #[error("Failed to open socket to {url}: {reason}")]
    ConnectFailed {
        /// Target URL
        url: String,
        /// Failure reason
        reason: String,
    },

    /// The transport rejected an outbound message
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// The socket has already shut down
    #[error("Socket is closed")]
    SocketClosed,

    /// The server URL is not a websocket URL
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    /// The client session loop is no longer running
    #[error("Client session has ended")]
    SessionEnded,
}

impl ConnectionError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConnectionError::ConnectFailed { .. } => ErrorSeverity::Warning,
            ConnectionError::SendFailed(_) => ErrorSeverity::Warning,
            ConnectionError::SocketClosed => ErrorSeverity::Warning,
            ConnectionError::InvalidUrl(_) => ErrorSeverity::Error,
            ConnectionError::SessionEnded => ErrorSeverity::Error,
        }
    }

    /// Create a connect failure.
    pub fn connect_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ConnectionError::ConnectFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
