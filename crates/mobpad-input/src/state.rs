//! Logical controller state and the delta accumulator feeding the wire.

use std::collections::BTreeMap;
use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};

/// Value of one controller field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Button or direction
    Bool(bool),
    /// Axis position
    Axis(f64),
}

impl FieldValue {
    /// The boolean value, if this is a button field.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            FieldValue::Axis(_) => None,
        }
    }

    /// The axis value, if this is an axis field.
    pub fn as_axis(&self) -> Option<f64> {
        match self {
            FieldValue::Axis(value) => Some(*value),
            FieldValue::Bool(_) => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Axis(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Axis(value) => write!(f, "{value}"),
        }
    }
}

/// Field name to value, ordered by name so encodings are stable.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// The full, persistent controller state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogicalControllerState {
    fields: FieldMap,
}

impl LogicalControllerState {
    /// Current value of a field.
    pub fn get(&self, field: &str) -> Option<FieldValue> {
        self.fields.get(field).copied()
    }

    /// Set a field, returning whether its value changed.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) -> bool {
        self.fields.insert(field.into(), value) != Some(value)
    }

    /// All fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of known fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &FieldMap {
        &self.fields
    }
}

/// Pending changes since the last flush.
///
/// Writes to the same field within one flush window are last-write-wins.
/// [`flush`](Self::flush) hands the pending map over and leaves a fresh
/// empty one, so a write after a flush always lands in the next window.
#[derive(Debug, Clone, Default)]
pub struct DeltaStateAccumulator {
    pending: FieldMap,
}

impl DeltaStateAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a partial update into the pending delta.
    pub fn set_state(&mut self, partial: FieldMap) {
        self.pending.extend(partial);
    }

    /// Record a single field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.pending.insert(field.into(), value.into());
    }

    /// Take the pending delta, leaving the accumulator empty.
    pub fn flush(&mut self) -> FieldMap {
        mem::take(&mut self.pending)
    }

    /// Pending changes without clearing them.
    pub fn pending(&self) -> &FieldMap {
        &self.pending
    }

    /// Whether nothing changed since the last flush.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, FieldValue)]) -> FieldMap {
        entries
            .iter()
            .map(|(name, value)| ((*name).to_owned(), *value))
            .collect()
    }

    #[test]
    fn test_flush_returns_merged_then_empty() {
        let mut delta = DeltaStateAccumulator::new();
        delta.set_state(map(&[("A", FieldValue::Axis(1.0))]));
        delta.set_state(map(&[("B", FieldValue::Axis(2.0))]));

        let flushed = delta.flush();
        assert_eq!(
            flushed,
            map(&[("A", FieldValue::Axis(1.0)), ("B", FieldValue::Axis(2.0))])
        );
        assert!(delta.flush().is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut delta = DeltaStateAccumulator::new();
        delta.set("BUTTON_A", true);
        delta.set("BUTTON_A", false);
        assert_eq!(delta.pending().get("BUTTON_A"), Some(&FieldValue::Bool(false)));
        assert_eq!(delta.pending().len(), 1);
    }

    #[test]
    fn test_write_after_flush_starts_new_window() {
        let mut delta = DeltaStateAccumulator::new();
        delta.set("BUTTON_A", true);
        let first = delta.flush();
        delta.set("BUTTON_B", true);
        assert_eq!(first.len(), 1);
        assert_eq!(delta.flush(), map(&[("BUTTON_B", FieldValue::Bool(true))]));
    }

    #[test]
    fn test_state_set_reports_change() {
        let mut state = LogicalControllerState::default();
        assert!(state.set("BUTTON_A", FieldValue::Bool(false)));
        assert!(!state.set("BUTTON_A", FieldValue::Bool(false)));
        assert!(state.set("BUTTON_A", FieldValue::Bool(true)));
        assert_eq!(state.get("BUTTON_A"), Some(FieldValue::Bool(true)));
    }

    #[test]
    fn test_field_value_serializes_bare() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&FieldValue::Bool(true))?, "true");
        assert_eq!(serde_json::to_string(&FieldValue::Axis(0.5))?, "0.5");
        let parsed: FieldValue = serde_json::from_str("0.25")?;
        assert_eq!(parsed.as_axis(), Some(0.25));
        Ok(())
    }
}
