//! Settings store errors.

use core::fmt::Display;

use crate::common::ErrorSeverity;

/// Errors raised while loading, validating or updating client settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A setting holds a value outside its accepted range or format
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting key
        key: String,
        /// Offending value, rendered as text
        value: String,
    },

    /// The key is not a known setting
    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    /// The stored document could not be parsed
    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConfigError::InvalidValue { .. } => ErrorSeverity::Error,
            ConfigError::UnknownKey(_) => ErrorSeverity::Warning,
            ConfigError::Parse(_) => ErrorSeverity::Error,
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, value: impl Display) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            value: value.to_string(),
        }
    }
}
