//! Property tests for vibration patterns.

use mobpad_client::vibration::vibration_pattern;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_pulses_are_uniform_with_one_ms_gap(magnitude in 0.0f64..=1.0, duration in 0u32..10_000) {
        let pattern = vibration_pattern(magnitude, f64::from(duration));
        prop_assert_eq!(pattern.len() % 2, 0);
        if let Some(&on) = pattern.first() {
            prop_assert!((1..=100).contains(&on));
            for pair in pattern.chunks(2) {
                prop_assert_eq!(pair, &[on, 1][..]);
            }
        }
    }

    #[test]
    fn prop_pattern_fills_duration(magnitude in 0.01f64..=1.0, duration in 0u32..10_000) {
        let pattern = vibration_pattern(magnitude, f64::from(duration));
        let total: u64 = pattern.iter().sum();
        prop_assert!(total <= u64::from(duration));
        let pulse = pattern.first().map_or(0, |on| on + 1);
        if pulse > 0 {
            prop_assert!(u64::from(duration) - total < pulse);
        } else {
            prop_assert!(u64::from(duration) < 101);
        }
    }
}
