//! Pointer sessions: which input each active pointer is driving.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::registry::InputKind;
use crate::rules::InputRule;

/// Opaque identifier of a concurrently active touch or mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u64);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pointer#{}", self.0)
    }
}

impl From<u64> for PointerId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Live association between a pointer and the input it pressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointerSession {
    rule: InputRule,
    down_position: Point,
    move_position: Option<Point>,
    extent_radius: Option<f64>,
}

impl PointerSession {
    /// Start a session on `rule` at `down_position`.
    ///
    /// Only analog sticks keep the extent radius.
    pub fn new(rule: InputRule, down_position: Point, extent_radius: f64) -> Self {
        let extent_radius = (rule.kind() == InputKind::Axis2D).then_some(extent_radius);
        Self {
            rule,
            down_position,
            move_position: None,
            extent_radius,
        }
    }

    /// The rule driving this session's input.
    pub fn rule(&self) -> &InputRule {
        &self.rule
    }

    /// Input id.
    pub fn input_id(&self) -> &str {
        self.rule.id()
    }

    /// Where the pointer went down.
    pub fn down_position(&self) -> Point {
        self.down_position
    }

    /// Last recorded move, if any.
    pub fn move_position(&self) -> Option<Point> {
        self.move_position
    }

    /// Most recent position: the last move, else the press.
    pub fn current_position(&self) -> Point {
        self.move_position.unwrap_or(self.down_position)
    }

    /// Stick travel radius, only set for analog sticks.
    pub fn extent_radius(&self) -> Option<f64> {
        self.extent_radius
    }

    pub(crate) fn record_move(&mut self, point: Point) {
        self.move_position = Some(point);
    }
}

/// Exclusive owner of every active pointer session.
#[derive(Debug, Clone, Default)]
pub struct PointerSessionTracker {
    sessions: HashMap<PointerId, PointerSession>,
}

impl PointerSessionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session, returning any session the pointer already had.
    pub fn begin(&mut self, pointer: PointerId, session: PointerSession) -> Option<PointerSession> {
        self.sessions.insert(pointer, session)
    }

    /// Session for a pointer.
    pub fn get(&self, pointer: PointerId) -> Option<&PointerSession> {
        self.sessions.get(&pointer)
    }

    /// Mutable session for a pointer.
    pub fn get_mut(&mut self, pointer: PointerId) -> Option<&mut PointerSession> {
        self.sessions.get_mut(&pointer)
    }

    /// Remove a pointer's session. Ending an unknown pointer returns `None`.
    pub fn end(&mut self, pointer: PointerId) -> Option<PointerSession> {
        self.sessions.remove(&pointer)
    }

    /// Snapshot of active sessions for overlay rendering.
    pub fn iter(&self) -> impl Iterator<Item = (PointerId, &PointerSession)> {
        self.sessions.iter().map(|(pointer, session)| (*pointer, session))
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no pointer is active.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
