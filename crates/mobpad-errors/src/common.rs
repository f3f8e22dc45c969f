//! Top-level error type and classification shared by every crate.

use core::fmt;

use crate::{ConfigError, ConnectionError, InputError, ProtocolError};

/// Top-level error type wrapping all MobPad sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum MobpadError {
    /// Colour registry and surface errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Wire payload errors
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Socket and transport errors
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Settings errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl MobpadError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            MobpadError::Input(_) => ErrorCategory::Input,
            MobpadError::Protocol(_) => ErrorCategory::Protocol,
            MobpadError::Connection(_) => ErrorCategory::Connection,
            MobpadError::Config(_) => ErrorCategory::Config,
            MobpadError::Io(_) => ErrorCategory::Io,
            MobpadError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MobpadError::Input(e) => e.severity(),
            MobpadError::Protocol(e) => e.severity(),
            MobpadError::Connection(e) => e.severity(),
            MobpadError::Config(e) => e.severity(),
            MobpadError::Io(_) => ErrorSeverity::Error,
            MobpadError::Other(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Connection failures are always recoverable: the connection monitor
    /// rebuilds the socket on its next health check.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        MobpadError::Other(msg.into())
    }
}

impl From<std::io::Error> for MobpadError {
    fn from(e: std::io::Error) -> Self {
        MobpadError::Io(e)
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Colour registry and surface errors
    Input = 0,
    /// Wire payload errors
    Protocol = 1,
    /// Socket and transport errors
    Connection = 2,
    /// Settings errors
    Config = 3,
    /// I/O errors
    Io = 4,
    /// Other errors
    Other = 255,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Input => write!(f, "Input"),
            ErrorCategory::Protocol => write!(f, "Protocol"),
            ErrorCategory::Connection => write!(f, "Connection"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Io => write!(f, "IO"),
            ErrorCategory::Other => write!(f, "Other"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the client cannot continue
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
