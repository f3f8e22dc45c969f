//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use mobpad_errors::prelude::*;
//!
//! fn require_ws(url: &str) -> MobpadResult<()> {
//!     if !url.starts_with("ws") {
//!         return Err(ConnectionError::InvalidUrl(url.to_string()).into());
//!     }
//!     Ok(())
//! }
//! # assert!(require_ws("http://host").is_err());
//! ```

pub use crate::{
    MobpadResult,
    common::{ErrorCategory, ErrorSeverity, MobpadError},
    config::ConfigError,
    connection::ConnectionError,
    input::InputError,
    protocol::ProtocolError,
};
