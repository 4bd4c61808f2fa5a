// Stored movement defaults used when a request leaves a parameter out

use crate::config::{DEFAULT_DISTANCE_CM, DEFAULT_SPEED_RPM, DEFAULT_TIME_S, MAX_SPEED_RPM};

/// Per-controller movement defaults.
///
/// `speed` stays within [0, MAX_SPEED_RPM]; `time` and `distance` stay
/// non-negative. Setters never fail: a rejected value leaves the previous one
/// in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotDefaults {
    speed: f32,
    time: f32,
    distance: f32,
}

impl Default for RobotDefaults {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED_RPM,
            time: DEFAULT_TIME_S,
            distance: DEFAULT_DISTANCE_CM,
        }
    }
}

impl RobotDefaults {
    /// Default speed in RPM
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Default duration in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Default distance in cm, also used as degrees for turns
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Negative keeps the current speed, anything above the ceiling is clamped
    pub fn set_speed(&mut self, speed: f32) {
        if is_rejected(speed) {
            return;
        }
        self.speed = speed.min(MAX_SPEED_RPM);
    }

    pub fn set_time(&mut self, time: f32) {
        if !is_rejected(time) {
            self.time = time;
        }
    }

    pub fn set_distance(&mut self, distance: f32) {
        if !is_rejected(distance) {
            self.distance = distance;
        }
    }
}

// NaN is grouped with negative input so the range invariants hold
fn is_rejected(value: f32) -> bool {
    value.is_nan() || value < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let defaults = RobotDefaults::default();
        assert_eq!(defaults.speed(), 50.0);
        assert_eq!(defaults.time(), 1.0);
        assert_eq!(defaults.distance(), 16.0);
    }

    #[test]
    fn test_speed_above_ceiling_is_clamped() {
        let mut defaults = RobotDefaults::default();
        defaults.set_speed(500.0);
        assert_eq!(defaults.speed(), 200.0);
    }

    #[test]
    fn test_negative_speed_keeps_previous() {
        let mut defaults = RobotDefaults::default();
        defaults.set_speed(120.0);
        defaults.set_speed(-1.0);
        assert_eq!(defaults.speed(), 120.0);
    }

    #[test]
    fn test_zero_speed_is_accepted() {
        let mut defaults = RobotDefaults::default();
        defaults.set_speed(0.0);
        assert_eq!(defaults.speed(), 0.0);
    }

    #[test]
    fn test_negative_distance_keeps_previous() {
        let mut defaults = RobotDefaults::default();
        defaults.set_distance(-3.0);
        assert_eq!(defaults.distance(), 16.0);

        defaults.set_distance(40.0);
        defaults.set_distance(-3.0);
        assert_eq!(defaults.distance(), 40.0);
    }

    #[test]
    fn test_negative_time_keeps_previous() {
        let mut defaults = RobotDefaults::default();
        defaults.set_time(2.5);
        defaults.set_time(-0.5);
        assert_eq!(defaults.time(), 2.5);

        // zero is a valid stored time, not a rejection
        defaults.set_time(0.0);
        assert_eq!(defaults.time(), 0.0);
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut defaults = RobotDefaults::default();
        defaults.set_speed(f32::NAN);
        defaults.set_time(f32::NAN);
        defaults.set_distance(f32::NAN);
        assert_eq!(defaults, RobotDefaults::default());
    }

    #[test]
    fn test_speed_always_in_range() {
        let mut defaults = RobotDefaults::default();
        for value in [-1000.0, -0.1, 0.0, 1.0, 199.9, 200.0, 200.1, 1e9] {
            defaults.set_speed(value);
            assert!(
                (0.0..=MAX_SPEED_RPM).contains(&defaults.speed()),
                "speed {} out of range after set_speed({})",
                defaults.speed(),
                value
            );
        }
    }
}
