//! Pixel sampling seam over the rendered hit-region image.

use mobpad_errors::InputError;

use crate::colour::ColourKey;
use crate::geometry::Point;

/// A rendered RGBA surface the engine can sample.
///
/// Supplied by the rendering collaborator. `pixels` exposes the whole
/// surface for region scans; `sample` reads a single pixel for hit tests.
pub trait PixelSurface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    fn pixels(&self) -> &[u8];

    /// Colour at integer coordinates, `None` outside the surface.
    fn sample(&self, x: u32, y: u32) -> Option<ColourKey> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let row = usize::try_from(y).ok()?.checked_mul(usize::try_from(self.width()).ok()?)?;
        let offset = row.checked_add(usize::try_from(x).ok()?)?.checked_mul(4)?;
        self.pixels().get(offset..).and_then(ColourKey::from_slice)
    }

    /// Colour under a pointer position, `None` for negative, non-finite or
    /// out-of-range coordinates.
    fn sample_at(&self, point: Point) -> Option<ColourKey> {
        self.sample(pixel_coordinate(point.x)?, pixel_coordinate(point.y)?)
    }
}

#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    reason = "range checked before the cast"
)]
fn pixel_coordinate(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value < f64::from(u32::MAX) {
        Some(value.floor() as u32)
    } else {
        None
    }
}

/// Owned row-major RGBA8 surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaSurface {
    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::SurfaceSize`] if `pixels` is not exactly
    /// `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, InputError> {
        let expected = byte_len(width, height);
        if Some(pixels.len()) != expected {
            return Err(InputError::SurfaceSize {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A surface filled with one colour. Dimensions too large to address
    /// produce an empty surface.
    pub fn filled(width: u32, height: u32, colour: ColourKey) -> Self {
        match byte_len(width, height) {
            Some(len) => Self {
                width,
                height,
                pixels: colour.channels().iter().copied().cycle().take(len).collect(),
            },
            None => Self {
                width: 0,
                height: 0,
                pixels: Vec::new(),
            },
        }
    }

    /// A fully transparent surface.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::filled(width, height, ColourKey::rgba(0, 0, 0, 0))
    }

    /// Overwrite one pixel. Out-of-range coordinates are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, colour: ColourKey) {
        if x >= self.width || y >= self.height {
            return;
        }
        let Some(offset) = byte_len(self.width, y)
            .and_then(|row| row.checked_add(usize::try_from(x).ok()?.checked_mul(4)?))
        else {
            return;
        };
        if let Some(pixel) = self.pixels.get_mut(offset..offset.saturating_add(4)) {
            pixel.copy_from_slice(&colour.channels());
        }
    }

    /// Paint a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, colour: ColourKey) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.put_pixel(px, py, colour);
            }
        }
    }

    /// Consume the surface, returning its buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

impl PixelSurface for RgbaSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl<T: PixelSurface + ?Sized> PixelSurface for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixels(&self) -> &[u8] {
        (**self).pixels()
    }
}

fn byte_len(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(RgbaSurface::new(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            RgbaSurface::new(2, 2, vec![0; 12]),
            Err(InputError::SurfaceSize { expected: 16, actual: 12, .. })
        ));
    }

    #[test]
    fn test_put_and_sample() {
        let mut surface = RgbaSurface::transparent(4, 3);
        let red = ColourKey::opaque(255, 0, 0);
        surface.put_pixel(3, 2, red);
        assert_eq!(surface.sample(3, 2), Some(red));
        assert_eq!(surface.sample(2, 2), Some(ColourKey::rgba(0, 0, 0, 0)));
        assert_eq!(surface.sample(4, 0), None);
        assert_eq!(surface.sample(0, 3), None);
    }

    #[test]
    fn test_sample_at_floors_and_rejects_negative() {
        let mut surface = RgbaSurface::transparent(4, 4);
        let blue = ColourKey::opaque(0, 0, 255);
        surface.put_pixel(1, 2, blue);
        assert_eq!(surface.sample_at(Point::new(1.9, 2.2)), Some(blue));
        assert_eq!(surface.sample_at(Point::new(-0.5, 2.0)), None);
        assert_eq!(surface.sample_at(Point::new(f64::NAN, 2.0)), None);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut surface = RgbaSurface::transparent(4, 4);
        let green = ColourKey::opaque(0, 255, 0);
        surface.fill_rect(2, 2, 10, 10, green);
        assert_eq!(surface.sample(3, 3), Some(green));
        assert_eq!(surface.sample(1, 3), Some(ColourKey::rgba(0, 0, 0, 0)));
    }
}
