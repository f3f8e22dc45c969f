//! Common imports for driving the input engine.

pub use crate::colour::{ColourKey, CompositeKey};
pub use crate::geometry::{BoundingBox, Point};
pub use crate::pad::PadState;
pub use crate::region::{RegionCache, RegionLocator};
pub use crate::registry::{ColourRegistry, InputDescriptor, InputKind, standard};
pub use crate::state::{FieldMap, FieldValue};
pub use crate::surface::{PixelSurface, RgbaSurface};
pub use crate::tracker::{PointerId, PointerSession};
