//! Centralized error types for MobPad
//!
//! Every crate in the workspace reports failures through the types defined
//! here, so the client session can classify and log them uniformly.
//!
//! # Architecture
//!
//! - [`common`]: top-level [`MobpadError`], categories and severities
//! - [`input`]: colour registry and surface errors
//! - [`protocol`]: wire payload encoding and decoding errors
//! - [`connection`]: socket and transport errors
//! - [`config`]: settings store errors
//!
//! Outcomes the input engine treats as normal (a pointer landing on an
//! unregistered colour, a move for an untracked pointer) are never errors and
//! have no variant here.
//!
//! # Example
//!
//! ```
//! use mobpad_errors::prelude::*;
//!
//! fn sensitivity(value: f64) -> MobpadResult<f64> {
//!     if !(0.0..=1.0).contains(&value) {
//!         return Err(ConfigError::invalid_value("ANALOG_STICK_SENSITIVITY", value).into());
//!     }
//!     Ok(value)
//! }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod connection;
pub mod input;
pub mod prelude;
pub mod protocol;

pub use common::{ErrorCategory, ErrorSeverity, MobpadError};
pub use config::ConfigError;
pub use connection::ConnectionError;
pub use input::InputError;
pub use protocol::ProtocolError;

/// A specialized `Result` type for MobPad operations.
pub type MobpadResult<T> = std::result::Result<T, MobpadError>;
