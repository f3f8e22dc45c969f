//! Shared test utilities for MobPad.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with `#[track_caller]` panic locations
//! - [`mock`] - A scriptable socket and socket factory
//! - [`fixtures`] - Synthetic layout surfaces
//! - [`prelude`] - Convenience re-exports
//!
//! ```rust,ignore
//! use mobpad_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod fixtures;
pub mod mock;
pub mod must;
pub mod prelude;

pub use must::*;
