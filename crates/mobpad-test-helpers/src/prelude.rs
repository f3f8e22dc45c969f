//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use mobpad_test_helpers::prelude::*;
//! ```

pub use crate::fixtures::{Rect, SurfaceBuilder, centre_of, layout, standard_layout};
pub use crate::mock::{MockSocket, MockSocketFactory, MockSocketHandle};
pub use crate::must::{must, must_parse, must_some, must_with};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
