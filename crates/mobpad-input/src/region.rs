//! Region location: derive bounding boxes from the rendered surface.
//!
//! Scanning touches every pixel, so boxes are computed once per render and
//! kept in a [`RegionCache`] until the surface changes.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::colour::{ColourKey, CompositeKey};
use crate::geometry::BoundingBox;
use crate::registry::ColourRegistry;
use crate::surface::PixelSurface;

#[derive(Debug, Clone, Copy)]
struct Extents {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl Extents {
    fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn into_box(self) -> BoundingBox {
        BoundingBox::from_extents(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Visit every pixel of `surface` in row-major order.
fn for_each_pixel<S, F>(surface: &S, mut visit: F)
where
    S: PixelSurface + ?Sized,
    F: FnMut(u32, u32, &[u8]),
{
    let Ok(width) = usize::try_from(surface.width()) else {
        return;
    };
    if width == 0 {
        return;
    }
    let rows = surface.pixels().chunks_exact(width.saturating_mul(4));
    for (y, row) in (0..surface.height()).zip(rows) {
        for (x, pixel) in (0..surface.width()).zip(row.chunks_exact(4)) {
            visit(x, y, pixel);
        }
    }
}

/// Scans a surface for painted regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionLocator;

impl RegionLocator {
    /// Smallest box enclosing every pixel matching any of `keys`.
    ///
    /// Returns `None` when nothing matches; the input then has no spatial
    /// hit testing until the next render.
    pub fn derive_bounding_box<S>(surface: &S, keys: &CompositeKey) -> Option<BoundingBox>
    where
        S: PixelSurface + ?Sized,
    {
        let mut extents: Option<Extents> = None;
        for_each_pixel(surface, |x, y, pixel| {
            let Some(colour) = ColourKey::from_slice(pixel) else {
                return;
            };
            if keys.matches(colour) {
                match extents.as_mut() {
                    Some(found) => found.include(x, y),
                    None => extents = Some(Extents::at(x, y)),
                }
            }
        });
        extents.map(Extents::into_box)
    }

    /// Boxes for every input that draws a region, in a single scan.
    pub fn locate_all<S>(surface: &S, registry: &ColourRegistry) -> RegionCache
    where
        S: PixelSurface + ?Sized,
    {
        let mut found: HashMap<&str, Extents> = HashMap::new();
        for_each_pixel(surface, |x, y, pixel| {
            let Some(descriptor) =
                ColourKey::from_slice(pixel).and_then(|colour| registry.lookup(colour))
            else {
                return;
            };
            if !descriptor.kind().has_drawn_region() {
                return;
            }
            found
                .entry(descriptor.id())
                .and_modify(|extents| extents.include(x, y))
                .or_insert_with(|| Extents::at(x, y));
        });

        let boxes: HashMap<String, BoundingBox> = found
            .into_iter()
            .map(|(id, extents)| (id.to_owned(), extents.into_box()))
            .collect();

        for (descriptor, _) in registry.iter() {
            if descriptor.kind().has_drawn_region() && !boxes.contains_key(descriptor.id()) {
                debug!(input = %descriptor, "No pixels matched, input has no bounding box");
            }
        }
        trace!(
            located = boxes.len(),
            width = surface.width(),
            height = surface.height(),
            "Region scan complete"
        );

        RegionCache {
            boxes,
            surface_size: (surface.width(), surface.height()),
        }
    }
}

/// Bounding boxes derived from one render of the surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionCache {
    boxes: HashMap<String, BoundingBox>,
    surface_size: (u32, u32),
}

impl RegionCache {
    /// Box for an input, if its region was found.
    pub fn get(&self, id: &str) -> Option<&BoundingBox> {
        self.boxes.get(id)
    }

    /// All located boxes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundingBox)> {
        self.boxes.iter().map(|(id, bbox)| (id.as_str(), bbox))
    }

    /// Number of located boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether no region was located.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Width and height of the surface the cache was built from.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }
}
