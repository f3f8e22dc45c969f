//! Points and bounding boxes in image-surface pixel coordinates.

use serde::{Deserialize, Serialize};

/// A pointer position in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position, growing right
    pub x: f64,
    /// Vertical position, growing down
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle enclosing a hit region.
///
/// Derived from the rendered surface, never authoritative. An input whose
/// colours match no pixel has no box at all (`Option::None`), never an
/// empty box at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width, never negative
    pub width: f64,
    /// Height, never negative
    pub height: f64,
}

impl BoundingBox {
    /// Create a box. Negative extents are clamped to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Square box of half-extent `radius` centred on `centre`.
    pub fn around(centre: Point, radius: f64) -> Self {
        Self::new(
            centre.x - radius,
            centre.y - radius,
            radius * 2.0,
            radius * 2.0,
        )
    }

    /// Box from inclusive min/max pixel indices, as produced by a scan.
    pub fn from_extents(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        let (min_x, max_x) = (f64::from(min_x), f64::from(max_x));
        let (min_y, max_y) = (f64::from(min_y), f64::from(max_y));
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Centre point.
    pub fn centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Position of `point` relative to the centre, scaled so the box edges
    /// sit at -1 and +1 on each axis.
    ///
    /// Points outside the box produce values beyond that range. A zero
    /// extent on an axis yields 0 on that axis.
    pub fn relative_position(&self, point: Point) -> (f64, f64) {
        let centre = self.centre();
        (
            relative(point.x - centre.x, self.width / 2.0),
            relative(point.y - centre.y, self.height / 2.0),
        )
    }

    /// Whether `point` lies inside or on the edge of the box.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

fn relative(offset: f64, half_extent: f64) -> f64 {
    if half_extent > 0.0 {
        offset / half_extent
    } else {
        0.0
    }
}
