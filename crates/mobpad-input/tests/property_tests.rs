//! Property tests for the input rules, region scan and delta accumulator.

use mobpad_input::prelude::*;
use mobpad_input::rules::{DEAD_ZONE, clamp_to_unit_circle, dirpad_directions};
use mobpad_input::state::DeltaStateAccumulator;
use mobpad_test_helpers::prelude::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn dead_zone_never_fires_inside(x in -DEAD_ZONE..=DEAD_ZONE, y in -DEAD_ZONE..=DEAD_ZONE) {
        prop_assert_eq!(dirpad_directions(x, y), [false; 4]);
    }

    #[test]
    fn opposite_directions_are_exclusive(x in -3.0f64..3.0, y in -3.0f64..3.0) {
        let [left, right, up, down] = dirpad_directions(x, y);
        prop_assert!(!(left && right));
        prop_assert!(!(up && down));
    }

    #[test]
    fn clamp_bounds_magnitude_and_keeps_direction(x in -50.0f64..50.0, y in -50.0f64..50.0) {
        let (cx, cy) = clamp_to_unit_circle(x, y);
        prop_assert!(cx.hypot(cy) <= 1.0 + 1e-12);
        // Cross product zero and same sign means same direction.
        prop_assert!((cx * y - cy * x).abs() < 1e-9);
        prop_assert!(cx * x >= 0.0 && cy * y >= 0.0);
        if x.hypot(y) <= 1.0 {
            prop_assert!((cx - x).abs() < 1e-12 && (cy - y).abs() < 1e-12);
        }
    }

    #[test]
    fn delta_is_last_write_wins(writes in prop::collection::vec((0usize..5, any::<bool>()), 0..50)) {
        let names = ["A", "B", "C", "D", "E"];
        let mut delta = DeltaStateAccumulator::new();
        let mut expected = FieldMap::new();
        for (index, value) in &writes {
            let name = names[*index];
            delta.set(name, *value);
            expected.insert(name.to_string(), FieldValue::Bool(*value));
        }
        prop_assert_eq!(delta.flush(), expected);
        prop_assert!(delta.flush().is_empty());
    }

    #[test]
    fn box_encloses_painted_rect(x in 0u32..40, y in 0u32..40, w in 1u32..20, h in 1u32..20) {
        let colour = ColourKey::opaque(10, 20, 30);
        let surface = SurfaceBuilder::new(64, 64).rect((x, y, w, h), colour).build();
        let found = RegionLocator::derive_bounding_box(&surface, &CompositeKey::from(colour));
        let expected = BoundingBox::new(
            f64::from(x),
            f64::from(y),
            f64::from(w - 1),
            f64::from(h - 1),
        );
        prop_assert_eq!(found, Some(expected));
    }

    #[test]
    fn every_painted_pixel_lies_in_its_box(
        pixels in prop::collection::vec((0u32..48, 0u32..48), 1..30)
    ) {
        let colour = ColourKey::opaque(1, 2, 3);
        let mut builder = SurfaceBuilder::new(48, 48);
        for (x, y) in &pixels {
            builder = builder.pixel(*x, *y, colour);
        }
        let surface = builder.build();
        let found = RegionLocator::derive_bounding_box(&surface, &CompositeKey::from(colour));
        prop_assert!(found.is_some());
        if let Some(bbox) = found {
            for (x, y) in &pixels {
                prop_assert!(bbox.contains(Point::new(f64::from(*x), f64::from(*y))));
            }
        }
    }

    #[test]
    fn pointer_up_always_returns_to_neutral(px in 0.0f64..200.0, py in 0.0f64..120.0, mx in -50.0f64..250.0, my in -50.0f64..170.0) {
        let mut pad = PadState::new(
            std::sync::Arc::new(ColourRegistry::standard()),
            standard_layout(),
        );
        let neutral = pad.state().clone();
        pad.on_pointer_down(PointerId(1), Point::new(px, py));
        pad.on_pointer_move(PointerId(1), Point::new(mx, my));
        pad.on_pointer_up(PointerId(1));
        prop_assert_eq!(pad.state(), &neutral);
    }
}
