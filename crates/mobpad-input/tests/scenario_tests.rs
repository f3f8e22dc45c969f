//! Pointer scenarios over the stock layout.

use std::sync::Arc;

use mobpad_input::prelude::*;
use mobpad_test_helpers::prelude::*;

const EPS: f64 = 1e-9;

fn pad() -> PadState<RgbaSurface> {
    let mut pad = PadState::new(Arc::new(ColourRegistry::standard()), standard_layout());
    pad.flush_state();
    pad
}

fn axis(delta: &FieldMap, field: &str) -> f64 {
    must_some(
        delta.get(field).and_then(FieldValue::as_axis),
        "axis field missing from delta",
    )
}

fn flag(delta: &FieldMap, field: &str) -> Option<bool> {
    delta.get(field).and_then(FieldValue::as_bool)
}

#[test]
fn button_press_and_release() {
    let mut pad = pad();
    let a = centre_of(layout::button(0));

    assert!(pad.on_pointer_down(PointerId(1), a));
    assert_eq!(flag(&pad.flush_state(), "BUTTON_A"), Some(true));

    pad.on_pointer_up(PointerId(1));
    assert_eq!(flag(&pad.flush_state(), "BUTTON_A"), Some(false));
}

#[test]
fn button_ignores_drag() {
    let mut pad = pad();
    pad.on_pointer_down(PointerId(1), centre_of(layout::button(1)));
    pad.flush_state();

    pad.on_pointer_move(PointerId(1), Point::new(190.0, 5.0));
    assert!(pad.flush_state().is_empty());
    let session = pad.active_sessions().next().map(|(_, session)| session.move_position());
    assert_eq!(session, Some(None));
}

#[test]
fn trigger_drag_tracks_vertical_position() {
    let mut pad = pad();
    let (x, y, width, height) = layout::TRIGGER_RIGHT;
    let column = f64::from(x + width / 2);

    pad.on_pointer_down(PointerId(4), centre_of(layout::TRIGGER_RIGHT));
    assert!((axis(&pad.flush_state(), "AXIS_TRIGGERRIGHT") - 0.5).abs() < EPS);

    pad.on_pointer_move(PointerId(4), Point::new(column, f64::from(y)));
    assert!((axis(&pad.flush_state(), "AXIS_TRIGGERRIGHT") - 1.0).abs() < EPS);

    pad.on_pointer_move(PointerId(4), Point::new(column, f64::from(y + height - 1)));
    assert!(axis(&pad.flush_state(), "AXIS_TRIGGERRIGHT").abs() < EPS);

    pad.on_pointer_up(PointerId(4));
    assert_eq!(
        pad.state().get("AXIS_TRIGGERRIGHT"),
        Some(FieldValue::Axis(0.0))
    );
}

#[test]
fn trigger_overshoots_when_dragged_past_region() {
    let mut pad = pad();
    pad.on_pointer_down(PointerId(1), centre_of(layout::TRIGGER_RIGHT));
    pad.on_pointer_move(PointerId(1), Point::new(90.0, 100.0));
    let value = axis(&pad.flush_state(), "AXIS_TRIGGERRIGHT");
    assert!(value < 0.0, "expected overshoot below zero, got {value}");
}

#[test]
fn dirpad_diagonal_fires_two_directions() {
    let mut pad = pad();
    let bbox = *must_some(pad.bounding_boxes().get(standard::DPAD_ID), "dirpad box");
    let centre = bbox.centre();

    // Press on the up arm, then drag to the lower-right corner.
    pad.on_pointer_down(PointerId(2), centre_of(layout::DPAD_ARMS[0]));
    pad.on_pointer_move(
        PointerId(2),
        Point::new(bbox.x + bbox.width, bbox.y + bbox.height),
    );
    let delta = pad.flush_state();
    assert_eq!(flag(&delta, "BUTTON_DPAD_RIGHT"), Some(true));
    assert_eq!(flag(&delta, "BUTTON_DPAD_DOWN"), Some(true));
    assert_eq!(pad.state().get("BUTTON_DPAD_LEFT"), Some(FieldValue::Bool(false)));
    assert_eq!(pad.state().get("BUTTON_DPAD_UP"), Some(FieldValue::Bool(false)));

    pad.on_pointer_move(PointerId(2), centre);
    let delta = pad.flush_state();
    assert_eq!(flag(&delta, "BUTTON_DPAD_RIGHT"), Some(false));
    assert_eq!(flag(&delta, "BUTTON_DPAD_DOWN"), Some(false));
}

#[test]
fn stick_is_relative_to_press_and_clamped() {
    let mut pad = pad();
    let origin = centre_of(layout::STICK_LEFT);
    pad.on_pointer_down(PointerId(9), origin);
    // Pressing dead centre leaves the stick at rest, so nothing changes.
    assert!(pad.flush_state().is_empty());
    assert_eq!(pad.state().get("AXIS_LEFTX"), Some(FieldValue::Axis(0.0)));

    pad.on_pointer_move(PointerId(9), Point::new(origin.x + 10.0, origin.y));
    let delta = pad.flush_state();
    assert!((axis(&delta, "AXIS_LEFTX") - 0.5).abs() < EPS);

    // Far outside the drawn stick: still driven, clamped to the unit circle.
    pad.on_pointer_move(PointerId(9), Point::new(origin.x + 80.0, origin.y + 80.0));
    let delta = pad.flush_state();
    let (x, y) = (axis(&delta, "AXIS_LEFTX"), axis(&delta, "AXIS_LEFTY"));
    assert!((x.hypot(y) - 1.0).abs() < EPS);
    assert!((x - y).abs() < EPS);
}

#[test]
fn stick_radius_is_fixed_at_press() {
    let mut pad = pad();
    let origin = centre_of(layout::STICK_RIGHT);
    pad.on_pointer_down(PointerId(1), origin);
    pad.set_extent_radius(40.0);
    pad.on_pointer_move(PointerId(1), Point::new(origin.x + 10.0, origin.y));
    assert!((axis(&pad.flush_state(), "AXIS_RIGHTX") - 0.5).abs() < EPS);
}

#[test]
fn concurrent_pointers_drive_independent_inputs() {
    let mut pad = pad();
    pad.on_pointer_down(PointerId(1), centre_of(layout::button(2)));
    pad.on_pointer_down(PointerId(2), centre_of(layout::TRIGGER_LEFT));
    assert_eq!(pad.active_sessions().count(), 2);

    pad.on_pointer_up(PointerId(1));
    let delta = pad.flush_state();
    assert_eq!(flag(&delta, "BUTTON_X"), Some(false));
    assert!((axis(&delta, "AXIS_TRIGGERLEFT") - 0.5).abs() < EPS);
    assert_eq!(pad.active_sessions().count(), 1);
}

#[test]
fn orphaned_pointer_events_are_noops() {
    let mut pad = pad();
    pad.on_pointer_move(PointerId(77), Point::new(10.0, 10.0));
    pad.on_pointer_up(PointerId(77));
    assert!(pad.flush_state().is_empty());
}

#[test]
fn double_release_is_idempotent() {
    let mut pad = pad();
    pad.on_pointer_down(PointerId(1), centre_of(layout::button(0)));
    pad.on_pointer_up(PointerId(1));
    let after_first = pad.state().clone();
    pad.flush_state();

    pad.on_pointer_up(PointerId(1));
    assert_eq!(pad.state(), &after_first);
    assert!(pad.flush_state().is_empty());
}

#[test]
fn missing_region_skips_activation_but_still_resets() {
    let mut pad = pad();
    pad.on_pointer_down(PointerId(1), centre_of(layout::TRIGGER_LEFT));
    pad.flush_state();

    // Re-render without the trigger painted.
    pad.replace_surface(SurfaceBuilder::new(layout::WIDTH, layout::HEIGHT).build());
    assert!(pad.bounding_boxes().get("AXIS_TRIGGERLEFT").is_none());

    pad.on_pointer_move(PointerId(1), Point::new(75.0, 0.0));
    assert!(pad.flush_state().is_empty());

    pad.on_pointer_up(PointerId(1));
    assert_eq!(
        pad.flush_state().get("AXIS_TRIGGERLEFT"),
        Some(&FieldValue::Axis(0.0))
    );
}

#[test]
fn bounding_boxes_cover_region_inputs_only() {
    let pad = pad();
    let boxes = pad.bounding_boxes();
    assert_eq!(boxes.len(), 5);
    assert_eq!(
        boxes.get("AXIS_TRIGGERRIGHT").copied(),
        Some(BoundingBox::new(85.0, 0.0, 10.0, 50.0))
    );
    assert_eq!(
        boxes.get(standard::DPAD_ID).copied(),
        Some(BoundingBox::new(0.0, 10.0, 59.0, 59.0))
    );
    assert!(boxes.get("BUTTON_A").is_none());
}
