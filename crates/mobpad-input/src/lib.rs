//! Input-state engine for the MobPad touch controller
//!
//! Turns pointer events over a colour-keyed layout image into logical
//! controller state, and collects the changed fields for transmission.
//!
//! # Overview
//!
//! - **Colours** ([`colour`]): exact RGBA keys identifying hit regions
//! - **Registry** ([`registry`]): immutable colour-to-input table
//! - **Regions** ([`region`]): bounding boxes scanned from the rendered surface
//! - **Rules** ([`rules`]): per-category activate/reset, dead zone and stick clamp
//! - **Sessions** ([`tracker`]): which input each active pointer drives
//! - **Delta** ([`state`]): full state plus the fields changed since the last flush
//! - **Facade** ([`pad`]): [`PadState`] wiring all of the above to pointer events
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mobpad_input::prelude::*;
//!
//! let a = standard::BUTTONS[0].0;
//! let mut surface = RgbaSurface::transparent(32, 32);
//! surface.fill_rect(0, 0, 8, 8, a);
//!
//! let mut pad = PadState::new(Arc::new(ColourRegistry::standard()), surface);
//! pad.flush_state();
//!
//! pad.on_pointer_down(PointerId(1), Point::new(4.0, 4.0));
//! assert_eq!(pad.flush_state().get("BUTTON_A"), Some(&FieldValue::Bool(true)));
//!
//! pad.on_pointer_up(PointerId(1));
//! assert_eq!(pad.flush_state().get("BUTTON_A"), Some(&FieldValue::Bool(false)));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod colour;
pub mod geometry;
pub mod pad;
pub mod prelude;
pub mod region;
pub mod registry;
pub mod rules;
pub mod state;
pub mod surface;
pub mod tracker;

pub use colour::{ColourKey, CompositeKey};
pub use geometry::{BoundingBox, Point};
pub use pad::PadState;
pub use region::{RegionCache, RegionLocator};
pub use registry::{ColourRegistry, ColourRegistryBuilder, InputDescriptor, InputKind};
pub use rules::{Activation, DEAD_ZONE, DEFAULT_EXTENT_RADIUS, InputRule};
pub use state::{DeltaStateAccumulator, FieldMap, FieldValue, LogicalControllerState};
pub use surface::{PixelSurface, RgbaSurface};
pub use tracker::{PointerId, PointerSession, PointerSessionTracker};
