//! Synthetic layout surfaces.
//!
//! [`standard_layout`] paints every input of the stock registry as plain
//! rectangles on a transparent background. The rectangles are exported in
//! [`layout`] so tests can aim pointers at known positions.

use mobpad_input::registry::standard;
use mobpad_input::{ColourKey, Point, RgbaSurface};

/// A rectangle as `(x, y, width, height)` in pixels.
pub type Rect = (u32, u32, u32, u32);

/// Positions of the inputs painted by [`standard_layout`].
pub mod layout {
    use super::Rect;

    /// Surface width.
    pub const WIDTH: u32 = 200;
    /// Surface height.
    pub const HEIGHT: u32 = 120;

    /// Directional pad arms, in the order of `standard::DPAD`.
    pub const DPAD_ARMS: [Rect; 4] = [(20, 10, 20, 20), (0, 30, 20, 20), (40, 30, 20, 20), (20, 50, 20, 20)];
    /// Left trigger.
    pub const TRIGGER_LEFT: Rect = (70, 0, 10, 50);
    /// Right trigger.
    pub const TRIGGER_RIGHT: Rect = (85, 0, 11, 51);
    /// Left stick.
    pub const STICK_LEFT: Rect = (100, 60, 30, 30);
    /// Right stick.
    pub const STICK_RIGHT: Rect = (140, 60, 30, 30);

    /// Button `index` of `standard::BUTTONS`, laid out in a row.
    pub const fn button(index: u32) -> Rect {
        (index * 15, 100, 10, 10)
    }
}

/// Paints rectangles into an RGBA surface.
#[derive(Debug, Clone)]
pub struct SurfaceBuilder {
    surface: RgbaSurface,
}

impl SurfaceBuilder {
    /// Start from a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: RgbaSurface::transparent(width, height),
        }
    }

    /// Paint a rectangle.
    pub fn rect(mut self, (x, y, width, height): Rect, colour: ColourKey) -> Self {
        self.surface.fill_rect(x, y, width, height, colour);
        self
    }

    /// Paint a single pixel.
    pub fn pixel(mut self, x: u32, y: u32, colour: ColourKey) -> Self {
        self.surface.put_pixel(x, y, colour);
        self
    }

    /// Finish.
    pub fn build(self) -> RgbaSurface {
        self.surface
    }
}

/// The stock layout painted at its fixed positions.
pub fn standard_layout() -> RgbaSurface {
    let mut builder = SurfaceBuilder::new(layout::WIDTH, layout::HEIGHT);
    for (index, (colour, _)) in (0u32..).zip(standard::BUTTONS) {
        builder = builder.rect(layout::button(index), colour);
    }
    for (arm, colour) in layout::DPAD_ARMS.into_iter().zip(standard::DPAD) {
        builder = builder.rect(arm, colour);
    }
    builder
        .rect(layout::TRIGGER_LEFT, standard::TRIGGERS[0].0)
        .rect(layout::TRIGGER_RIGHT, standard::TRIGGERS[1].0)
        .rect(layout::STICK_LEFT, standard::STICKS[0].0)
        .rect(layout::STICK_RIGHT, standard::STICKS[1].0)
        .build()
}

/// Centre of a rectangle's pixel span, in pointer coordinates.
pub fn centre_of((x, y, width, height): Rect) -> Point {
    Point::new(
        f64::from(x) + f64::from(width.saturating_sub(1)) / 2.0,
        f64::from(y) + f64::from(height.saturating_sub(1)) / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobpad_input::PixelSurface;

    #[test]
    fn test_standard_layout_paints_each_input() {
        let surface = standard_layout();
        let (x, y, _, _) = layout::button(0);
        assert_eq!(surface.sample(x, y), Some(standard::BUTTONS[0].0));
        let (x, y, _, _) = layout::STICK_RIGHT;
        assert_eq!(surface.sample(x + 5, y + 5), Some(standard::STICKS[1].0));
        assert_eq!(surface.sample(199, 0), Some(ColourKey::rgba(0, 0, 0, 0)));
    }

    #[test]
    fn test_centre_of_pixel_span() {
        assert_eq!(centre_of((10, 20, 11, 5)), Point::new(15.0, 22.0));
    }
}
