//! Colour registry and pixel surface errors.

use crate::common::ErrorSeverity;

/// Errors raised while building the colour registry or a pixel surface.
///
/// Hit-testing itself never fails: an unregistered colour is the expected
/// "background" outcome and is reported as `None`, not as an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// A colour key was bound to two different inputs
    #[error("Colour {colour} is already bound to {existing}, cannot bind it to {requested}")]
    DuplicateColour {
        /// The colour key in `r,g,b,a` form
        colour: String,
        /// Input the colour already resolves to
        existing: String,
        /// Input that tried to claim it
        requested: String,
    },

    /// An input id was registered under two categories
    #[error("Input {id} is registered as {existing}, cannot register it as {requested}")]
    ConflictingKind {
        /// Input identifier
        id: String,
        /// Category already recorded
        existing: String,
        /// Category requested
        requested: String,
    },

    /// A colour key string could not be parsed
    #[error("Invalid colour key '{0}': expected four comma-separated 0-255 channels")]
    InvalidColourKey(String),

    /// An input was registered with no colour keys
    #[error("Input {0} has no colour keys")]
    EmptyRegion(String),

    /// The pixel buffer does not match the declared dimensions
    #[error("Surface buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    SurfaceSize {
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// Required byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },
}

impl InputError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            InputError::DuplicateColour { .. } => ErrorSeverity::Critical,
            InputError::ConflictingKind { .. } => ErrorSeverity::Critical,
            InputError::InvalidColourKey(_) => ErrorSeverity::Error,
            InputError::EmptyRegion(_) => ErrorSeverity::Error,
            InputError::SurfaceSize { .. } => ErrorSeverity::Error,
        }
    }

    /// Create an invalid colour key error.
    pub fn invalid_colour_key(raw: impl Into<String>) -> Self {
        InputError::InvalidColourKey(raw.into())
    }
}
