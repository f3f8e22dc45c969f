//! Per-category activate and reset rules.
//!
//! Each [`InputRule`] variant owns the field names of its input and turns a
//! pointer position into field updates. Region-based rules need the input's
//! bounding box and are skipped when it is absent; reset never needs one.

use serde::Serialize;

use crate::geometry::{BoundingBox, Point};
use crate::registry::{InputDescriptor, InputKind};
use crate::state::{FieldMap, FieldValue};

/// Displacement a dirpad needs, in relative units, before a direction fires.
pub const DEAD_ZONE: f64 = 0.3;

/// Half-extent in pixels of an analog stick's travel square.
pub const DEFAULT_EXTENT_RADIUS: f64 = 20.0;

/// Whether each dirpad direction fires at a relative position, as
/// `[left, right, up, down]`.
///
/// Thresholds are strict: exactly [`DEAD_ZONE`] does not fire.
pub fn dirpad_directions(rel_x: f64, rel_y: f64) -> [bool; 4] {
    [
        rel_x < -DEAD_ZONE,
        rel_x > DEAD_ZONE,
        rel_y < -DEAD_ZONE,
        rel_y > DEAD_ZONE,
    ]
}

/// Map a relative vertical position to a trigger value.
///
/// Top edge maps to 1, bottom edge to 0. Positions outside the box overshoot
/// that range and are left unclamped.
pub fn axis_1d_value(rel_y: f64) -> f64 {
    (-rel_y / 2.0) + 0.5
}

/// Project a vector longer than 1 onto the unit circle, keeping its direction.
pub fn clamp_to_unit_circle(x: f64, y: f64) -> (f64, f64) {
    let magnitude = x.hypot(y);
    if magnitude > 1.0 {
        (x / magnitude, y / magnitude)
    } else {
        (x, y)
    }
}

/// Inputs to a rule activation.
#[derive(Debug, Clone, Copy)]
pub struct Activation<'a> {
    /// Current pointer position
    pub point: Point,
    /// Where the pointer went down
    pub origin: Point,
    /// Half-extent of the analog stick square
    pub extent_radius: f64,
    /// The input's located region, if any
    pub region: Option<&'a BoundingBox>,
}

/// Activate/reset behaviour for one logical input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum InputRule {
    /// Boolean field `{id}`
    Button(String),
    /// Boolean fields `{id}_LEFT`, `{id}_RIGHT`, `{id}_UP`, `{id}_DOWN`
    Dirpad(String),
    /// Numeric field `{id}`
    #[serde(rename = "axis_1d")]
    Axis1D(String),
    /// Numeric fields `{id}X` and `{id}Y`
    #[serde(rename = "axis_2d")]
    Axis2D(String),
}

impl InputRule {
    /// The input id this rule drives.
    pub fn id(&self) -> &str {
        match self {
            InputRule::Button(id)
            | InputRule::Dirpad(id)
            | InputRule::Axis1D(id)
            | InputRule::Axis2D(id) => id,
        }
    }

    /// The input category.
    pub fn kind(&self) -> InputKind {
        match self {
            InputRule::Button(_) => InputKind::Button,
            InputRule::Dirpad(_) => InputKind::Dirpad,
            InputRule::Axis1D(_) => InputKind::Axis1D,
            InputRule::Axis2D(_) => InputKind::Axis2D,
        }
    }

    /// Names of every field this rule writes.
    pub fn field_names(&self) -> Vec<String> {
        match self {
            InputRule::Button(id) | InputRule::Axis1D(id) => vec![id.clone()],
            InputRule::Dirpad(id) => dirpad_fields(id).into_iter().collect(),
            InputRule::Axis2D(id) => axis_2d_fields(id).into_iter().collect(),
        }
    }

    /// Field updates for a press or drag.
    ///
    /// Returns `None` when a region-based rule has no bounding box.
    pub fn activate(&self, activation: &Activation<'_>) -> Option<FieldMap> {
        let mut updates = FieldMap::new();
        match self {
            InputRule::Button(id) => {
                updates.insert(id.clone(), FieldValue::Bool(true));
            }
            InputRule::Dirpad(id) => {
                let (rel_x, rel_y) = activation.region?.relative_position(activation.point);
                for (field, fired) in dirpad_fields(id).into_iter().zip(dirpad_directions(rel_x, rel_y)) {
                    updates.insert(field, FieldValue::Bool(fired));
                }
            }
            InputRule::Axis1D(id) => {
                let (_, rel_y) = activation.region?.relative_position(activation.point);
                updates.insert(id.clone(), FieldValue::Axis(axis_1d_value(rel_y)));
            }
            InputRule::Axis2D(id) => {
                let travel = BoundingBox::around(activation.origin, activation.extent_radius);
                let (rel_x, rel_y) = travel.relative_position(activation.point);
                let (x, y) = clamp_to_unit_circle(rel_x, rel_y);
                let [field_x, field_y] = axis_2d_fields(id);
                updates.insert(field_x, FieldValue::Axis(x));
                updates.insert(field_y, FieldValue::Axis(y));
            }
        }
        Some(updates)
    }

    /// Field updates returning the input to neutral.
    pub fn reset(&self) -> FieldMap {
        let neutral = match self {
            InputRule::Button(_) | InputRule::Dirpad(_) => FieldValue::Bool(false),
            InputRule::Axis1D(_) | InputRule::Axis2D(_) => FieldValue::Axis(0.0),
        };
        self.field_names()
            .into_iter()
            .map(|field| (field, neutral))
            .collect()
    }
}

impl From<&InputDescriptor> for InputRule {
    fn from(descriptor: &InputDescriptor) -> Self {
        let id = descriptor.id().to_owned();
        match descriptor.kind() {
            InputKind::Button => InputRule::Button(id),
            InputKind::Dirpad => InputRule::Dirpad(id),
            InputKind::Axis1D => InputRule::Axis1D(id),
            InputKind::Axis2D => InputRule::Axis2D(id),
        }
    }
}

fn dirpad_fields(id: &str) -> [String; 4] {
    ["LEFT", "RIGHT", "UP", "DOWN"].map(|direction| format!("{id}_{direction}"))
}

fn axis_2d_fields(id: &str) -> [String; 2] {
    [format!("{id}X"), format!("{id}Y")]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn axis(updates: &FieldMap, field: &str) -> f64 {
        updates.get(field).and_then(FieldValue::as_axis).unwrap_or(f64::NAN)
    }

    fn flag(updates: &FieldMap, field: &str) -> Option<bool> {
        updates.get(field).and_then(FieldValue::as_bool)
    }

    fn activation(point: Point, region: Option<&BoundingBox>) -> Activation<'_> {
        Activation {
            point,
            origin: point,
            extent_radius: DEFAULT_EXTENT_RADIUS,
            region,
        }
    }

    #[test]
    fn test_dead_zone_is_strict() {
        assert_eq!(dirpad_directions(0.3, 0.0), [false; 4]);
        assert_eq!(dirpad_directions(-0.3, 0.3), [false; 4]);
        assert_eq!(dirpad_directions(0.31, 0.0), [false, true, false, false]);
        assert_eq!(dirpad_directions(-0.5, 0.9), [true, false, false, true]);
    }

    #[test]
    fn test_dirpad_activation_uses_region_centre() {
        let rule = InputRule::Dirpad("BUTTON_DPAD".into());
        let region = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let updates = rule.activate(&activation(Point::new(95.0, 5.0), Some(&region)));
        let Some(updates) = updates else {
            panic!("dirpad with a region must activate");
        };
        assert_eq!(flag(&updates, "BUTTON_DPAD_RIGHT"), Some(true));
        assert_eq!(flag(&updates, "BUTTON_DPAD_UP"), Some(true));
        assert_eq!(flag(&updates, "BUTTON_DPAD_LEFT"), Some(false));
        assert_eq!(flag(&updates, "BUTTON_DPAD_DOWN"), Some(false));
    }

    #[test]
    fn test_region_rules_skip_without_box() {
        let point = Point::new(1.0, 1.0);
        assert!(InputRule::Dirpad("D".into()).activate(&activation(point, None)).is_none());
        assert!(InputRule::Axis1D("T".into()).activate(&activation(point, None)).is_none());
        assert!(InputRule::Button("B".into()).activate(&activation(point, None)).is_some());
        assert!(InputRule::Axis2D("S".into()).activate(&activation(point, None)).is_some());
    }

    #[test]
    fn test_axis_1d_maps_top_to_one() {
        let rule = InputRule::Axis1D("AXIS_TRIGGERRIGHT".into());
        let region = BoundingBox::new(0.0, 100.0, 20.0, 200.0);
        let value_at = |y: f64| {
            rule.activate(&activation(Point::new(10.0, y), Some(&region)))
                .map_or(f64::NAN, |updates| axis(&updates, "AXIS_TRIGGERRIGHT"))
        };
        assert!(approx(value_at(200.0), 0.5));
        assert!(approx(value_at(100.0), 1.0));
        assert!(approx(value_at(300.0), 0.0));
        assert!(value_at(0.0) > 1.0);
    }

    #[test]
    fn test_axis_2d_is_relative_to_origin() {
        let rule = InputRule::Axis2D("AXIS_LEFT".into());
        let updates = rule.activate(&Activation {
            point: Point::new(110.0, 100.0),
            origin: Point::new(100.0, 100.0),
            extent_radius: 20.0,
            region: None,
        });
        let Some(updates) = updates else {
            panic!("sticks never need a region");
        };
        assert!(approx(axis(&updates, "AXIS_LEFTX"), 0.5));
        assert!(approx(axis(&updates, "AXIS_LEFTY"), 0.0));
    }

    #[test]
    fn test_axis_2d_clamps_diagonal_to_unit_circle() {
        let (x, y) = clamp_to_unit_circle(1.0, 1.0);
        assert!(approx(x.hypot(y), 1.0));
        assert!(approx(x / y, 1.0));
        assert_eq!(clamp_to_unit_circle(0.25, -0.5), (0.25, -0.5));
    }

    #[test]
    fn test_reset_is_neutral() {
        let dirpad = InputRule::Dirpad("BUTTON_DPAD".into()).reset();
        assert_eq!(dirpad.len(), 4);
        assert!(dirpad.values().all(|value| *value == FieldValue::Bool(false)));

        let stick = InputRule::Axis2D("AXIS_RIGHT".into()).reset();
        assert_eq!(
            stick.keys().map(String::as_str).collect::<Vec<_>>(),
            ["AXIS_RIGHTX", "AXIS_RIGHTY"]
        );
        assert!(approx(axis(&stick, "AXIS_RIGHTX"), 0.0));

        let button = InputRule::Button("BUTTON_A".into()).reset();
        assert_eq!(flag(&button, "BUTTON_A"), Some(false));
    }
}
