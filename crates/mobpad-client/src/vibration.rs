//! Rumble commands to device vibration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mobpad_connection::MessageSubscriber;
use mobpad_protocol::{InboundCommand, InboundMessage};
use tracing::{debug, trace, warn};

/// Longest rumble honoured, in milliseconds.
pub const MAX_DURATION_MS: f64 = 60_000.0;

/// Something that can buzz.
pub trait Actuator: Send {
    /// Play an on/off pattern of alternating millisecond durations,
    /// starting with "on". An empty pattern stops any vibration.
    fn vibrate(&mut self, pattern: &[u64]);
}

/// Actuator for hosts without a motor. Logs the pattern it was given.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogActuator;

impl Actuator for LogActuator {
    fn vibrate(&mut self, pattern: &[u64]) {
        debug!(pulses = pattern.len() / 2, "Vibrate");
    }
}

/// Turn a rumble magnitude and duration into a pulse pattern.
///
/// Each pulse is `floor(100 * magnitude)` ms on followed by 1 ms off, repeated
/// for as many whole pulses as fit in the duration. Weak rumble becomes short
/// buzzes with the same gap, which reads as lower intensity on devices that
/// only switch the motor on and off. A magnitude that rounds to zero gives an
/// empty pattern.
pub fn vibration_pattern(magnitude: f64, duration_ms: f64) -> Vec<u64> {
    let on = whole_millis(100.0 * magnitude.clamp(0.0, 1.0));
    if on == 0 {
        return Vec::new();
    }
    let pulse = on + 1;
    let duration = if duration_ms.is_nan() { 0.0 } else { duration_ms.min(MAX_DURATION_MS) };
    let repeats = whole_millis(duration) / pulse;
    let mut pattern = Vec::with_capacity(usize::try_from(repeats * 2).unwrap_or(0));
    for _ in 0..repeats {
        pattern.push(on);
        pattern.push(1);
    }
    pattern
}

#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    reason = "range checked before the cast"
)]
fn whole_millis(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 && value < f64::from(u32::MAX) {
        u64::from(value.floor() as u32)
    } else {
        0
    }
}

/// Inbound message subscriber that plays `vibrate` commands on an [`Actuator`].
#[derive(Debug)]
pub struct VibrationSubscriber<A> {
    actuator: A,
    enabled: Arc<AtomicBool>,
}

impl<A: Actuator> VibrationSubscriber<A> {
    /// Subscriber gated by the shared `enabled` flag.
    pub fn new(actuator: A, enabled: Arc<AtomicBool>) -> Self {
        Self { actuator, enabled }
    }

    /// The wrapped actuator.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}

impl<A: Actuator> MessageSubscriber for VibrationSubscriber<A> {
    fn on_message(&mut self, message: &InboundMessage) {
        match message.command() {
            Ok(InboundCommand::Vibrate(rumble)) => {
                if !self.enabled.load(Ordering::Relaxed) {
                    trace!("Vibration disabled, ignoring rumble");
                    return;
                }
                let pattern = vibration_pattern(rumble.magnitude(), rumble.duration_ms);
                debug!(magnitude = rumble.magnitude(), duration_ms = rumble.duration_ms, "Rumble");
                self.actuator.vibrate(&pattern);
            }
            Ok(InboundCommand::Unrecognized(kind)) => trace!(%kind, "Ignoring message"),
            Err(e) => warn!(error = %e, "Bad rumble command"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_magnitude_pattern() {
        let pattern = vibration_pattern(1.0, 303.0);
        assert_eq!(pattern, vec![100, 1, 100, 1, 100, 1]);
    }

    #[test]
    fn test_half_magnitude_pattern() {
        let pattern = vibration_pattern(0.5, 100.0);
        assert_eq!(pattern, vec![50, 1]);
    }

    #[test]
    fn test_short_duration_gives_nothing() {
        assert!(vibration_pattern(1.0, 100.0).is_empty());
    }

    #[test]
    fn test_zero_magnitude_gives_nothing() {
        assert!(vibration_pattern(0.0, 5000.0).is_empty());
        assert!(vibration_pattern(0.004, 5000.0).is_empty());
    }

    #[test]
    fn test_bad_inputs_give_nothing() {
        assert!(vibration_pattern(f64::NAN, 1000.0).is_empty());
        assert!(vibration_pattern(1.0, f64::NAN).is_empty());
        assert!(vibration_pattern(1.0, -50.0).is_empty());
    }

    #[test]
    fn test_duration_is_capped() {
        let pattern = vibration_pattern(1.0, f64::INFINITY);
        assert_eq!(pattern.len(), 2 * (60_000 / 101));
    }
}
