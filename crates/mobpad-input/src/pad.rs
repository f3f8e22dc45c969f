//! The input-state engine facade.
//!
//! [`PadState`] ties the registry, the cached region boxes, the pointer
//! tracker and the delta accumulator together behind the three pointer
//! events. All methods run to completion and never fail: unmatched colours
//! and unknown pointers are ordinary no-ops.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::geometry::Point;
use crate::region::{RegionCache, RegionLocator};
use crate::registry::{ColourRegistry, InputKind};
use crate::rules::{Activation, DEFAULT_EXTENT_RADIUS, InputRule};
use crate::state::{DeltaStateAccumulator, FieldMap, LogicalControllerState};
use crate::surface::PixelSurface;
use crate::tracker::{PointerId, PointerSession, PointerSessionTracker};

/// Controller state driven by pointer events over a rendered surface.
#[derive(Debug)]
pub struct PadState<S> {
    registry: Arc<ColourRegistry>,
    surface: S,
    regions: RegionCache,
    tracker: PointerSessionTracker,
    state: LogicalControllerState,
    delta: DeltaStateAccumulator,
    extent_radius: f64,
}

impl<S: PixelSurface> PadState<S> {
    /// Build the engine over a freshly rendered surface.
    ///
    /// Regions are located once here. The delta starts out holding every
    /// field at its neutral value, so the first flush describes the full pad.
    pub fn new(registry: Arc<ColourRegistry>, surface: S) -> Self {
        let regions = RegionLocator::locate_all(&surface, &registry);
        let mut pad = Self {
            registry,
            surface,
            regions,
            tracker: PointerSessionTracker::new(),
            state: LogicalControllerState::default(),
            delta: DeltaStateAccumulator::new(),
            extent_radius: DEFAULT_EXTENT_RADIUS,
        };
        pad.seed_neutral();
        pad
    }

    /// Override the stick travel radius used by new stick presses.
    #[must_use]
    pub fn with_extent_radius(mut self, radius: f64) -> Self {
        self.set_extent_radius(radius);
        self
    }

    fn seed_neutral(&mut self) {
        let neutral: Vec<FieldMap> = self
            .registry
            .iter()
            .map(|(descriptor, _)| InputRule::from(descriptor).reset())
            .collect();
        for updates in neutral {
            for (field, value) in updates {
                self.state.set(field.clone(), value);
                self.delta.set(field, value);
            }
        }
    }

    /// Handle a pointer press.
    ///
    /// Returns `true` when the press landed on a registered input and a
    /// session was started. A pointer that already had a session is released
    /// first.
    pub fn on_pointer_down(&mut self, pointer: PointerId, point: Point) -> bool {
        if self.tracker.get(pointer).is_some() {
            debug!(%pointer, "Pointer pressed again without release, resetting previous input");
            self.on_pointer_up(pointer);
        }

        let Some(descriptor) = self
            .surface
            .sample_at(point)
            .and_then(|colour| self.registry.lookup(colour))
        else {
            trace!(%pointer, x = point.x, y = point.y, "Pointer landed on background");
            return false;
        };

        let session = PointerSession::new(InputRule::from(descriptor), point, self.extent_radius);
        trace!(%pointer, input = session.input_id(), "Pointer session started");
        self.activate(&session, point);
        self.tracker.begin(pointer, session);
        true
    }

    /// Handle a pointer drag.
    ///
    /// Buttons ignore drags. Every other input follows the pointer even
    /// outside its drawn region.
    pub fn on_pointer_move(&mut self, pointer: PointerId, point: Point) {
        let Some(session) = self.tracker.get_mut(pointer) else {
            return;
        };
        if session.rule().kind() == InputKind::Button {
            return;
        }
        session.record_move(point);
        let session = session.clone();
        self.activate(&session, point);
    }

    /// Handle a pointer release. Releasing an unknown pointer does nothing.
    pub fn on_pointer_up(&mut self, pointer: PointerId) {
        let Some(session) = self.tracker.end(pointer) else {
            return;
        };
        trace!(%pointer, input = session.input_id(), "Pointer session ended");
        self.apply(session.rule().reset());
    }

    fn activate(&mut self, session: &PointerSession, point: Point) {
        let activation = Activation {
            point,
            origin: session.down_position(),
            extent_radius: session.extent_radius().unwrap_or(self.extent_radius),
            region: self.regions.get(session.input_id()),
        };
        match session.rule().activate(&activation) {
            Some(updates) => self.apply(updates),
            None => debug!(input = session.input_id(), "Input has no located region, activation skipped"),
        }
    }

    /// Record updates in the full state; only changed fields reach the delta.
    fn apply(&mut self, updates: FieldMap) {
        for (field, value) in updates {
            if self.state.set(field.clone(), value) {
                self.delta.set(field, value);
            }
        }
    }

    /// Take the fields changed since the previous flush.
    pub fn flush_state(&mut self) -> FieldMap {
        self.delta.flush()
    }

    /// The full logical controller state.
    pub fn state(&self) -> &LogicalControllerState {
        &self.state
    }

    /// Pending, unflushed changes.
    pub fn pending(&self) -> &FieldMap {
        self.delta.pending()
    }

    /// Located regions, for overlay rendering.
    pub fn bounding_boxes(&self) -> &RegionCache {
        &self.regions
    }

    /// Active pointer sessions, for overlay rendering.
    pub fn active_sessions(&self) -> impl Iterator<Item = (PointerId, &PointerSession)> {
        self.tracker.iter()
    }

    /// The registry in use.
    pub fn registry(&self) -> &ColourRegistry {
        &self.registry
    }

    /// The surface currently sampled.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Swap in a re-rendered surface and relocate every region.
    ///
    /// Active sessions survive; their next drag uses the new boxes.
    pub fn replace_surface(&mut self, surface: S) {
        self.regions = RegionLocator::locate_all(&surface, &self.registry);
        self.surface = surface;
        debug!(regions = self.regions.len(), "Surface replaced, regions relocated");
    }

    /// Stick travel radius applied to new stick presses. Non-positive or
    /// non-finite radii are ignored.
    pub fn set_extent_radius(&mut self, radius: f64) {
        if radius.is_finite() && radius > 0.0 {
            self.extent_radius = radius;
        }
    }

    /// Current stick travel radius.
    pub fn extent_radius(&self) -> f64 {
        self.extent_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::ColourKey;
    use crate::registry::standard;
    use crate::state::FieldValue;
    use crate::surface::RgbaSurface;

    const BUTTON_A: ColourKey = standard::BUTTONS[0].0;

    fn pad() -> PadState<RgbaSurface> {
        let mut surface = RgbaSurface::transparent(64, 64);
        surface.fill_rect(0, 0, 10, 10, BUTTON_A);
        PadState::new(Arc::new(ColourRegistry::standard()), surface)
    }

    #[test]
    fn test_first_flush_is_full_neutral_state() {
        let mut pad = pad();
        let first = pad.flush_state();
        assert_eq!(first.len(), pad.state().len());
        assert_eq!(first.get("BUTTON_A"), Some(&FieldValue::Bool(false)));
        assert_eq!(first.get("AXIS_LEFTX"), Some(&FieldValue::Axis(0.0)));
        assert!(pad.flush_state().is_empty());
    }

    #[test]
    fn test_background_press_is_noop() {
        let mut pad = pad();
        pad.flush_state();
        assert!(!pad.on_pointer_down(PointerId(1), Point::new(50.0, 50.0)));
        assert!(pad.flush_state().is_empty());
        assert_eq!(pad.active_sessions().count(), 0);
    }

    #[test]
    fn test_repress_releases_previous_session() {
        let mut pad = pad();
        pad.flush_state();
        assert!(pad.on_pointer_down(PointerId(1), Point::new(2.0, 2.0)));
        assert!(!pad.on_pointer_down(PointerId(1), Point::new(50.0, 50.0)));
        assert_eq!(pad.state().get("BUTTON_A"), Some(FieldValue::Bool(false)));
        assert_eq!(pad.active_sessions().count(), 0);
    }

    #[test]
    fn test_unchanged_fields_stay_out_of_delta() {
        let mut pad = pad();
        pad.flush_state();
        pad.on_pointer_down(PointerId(1), Point::new(2.0, 2.0));
        pad.on_pointer_down(PointerId(2), Point::new(3.0, 3.0));
        let delta = pad.flush_state();
        assert_eq!(delta.len(), 1);
        pad.on_pointer_up(PointerId(2));
        pad.on_pointer_up(PointerId(2));
        assert_eq!(pad.flush_state().get("BUTTON_A"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn test_extent_radius_rejects_invalid() {
        let mut pad = pad();
        pad.set_extent_radius(-1.0);
        pad.set_extent_radius(f64::NAN);
        assert!((pad.extent_radius() - DEFAULT_EXTENT_RADIUS).abs() < f64::EPSILON);
        pad.set_extent_radius(35.0);
        assert!((pad.extent_radius() - 35.0).abs() < f64::EPSILON);
    }
}
