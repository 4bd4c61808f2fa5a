// Movement-parameter resolution
//
// Turns a direction plus optional speed/time/distance into a concrete
// command. Resolution never fails: absent or invalid inputs fall back to the
// stored defaults.

use std::fmt;

use super::defaults::RobotDefaults;
use crate::config::MAX_SPEED_RPM;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Left and right rotate in place; their distance is an angle
    pub fn is_turn(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Sign applied to a distance or angle before it reaches the motors.
    /// Backward drives a negative distance, left turns counter-clockwise.
    pub fn distance_sign(&self) -> f32 {
        match self {
            Direction::Forward | Direction::Right => 1.0,
            Direction::Backward | Direction::Left => -1.0,
        }
    }

    fn verb(&self) -> &'static str {
        if self.is_turn() { "Turning" } else { "Moving" }
    }

    fn distance_unit(&self) -> &'static str {
        if self.is_turn() { "degrees" } else { "cm" }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Time,
    Distance,
}

/// Duration of a timed move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunFor {
    Seconds(f32),
    /// No bound: the motors keep going until an explicit stop
    Indefinitely,
}

impl RunFor {
    pub fn seconds(self) -> Option<f32> {
        match self {
            RunFor::Seconds(s) => Some(s),
            RunFor::Indefinitely => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    Time(RunFor),
    /// Unsigned cm for straight moves, degrees for turns
    Distance(f32),
}

/// Caller-supplied movement parameters. `None` means "not given".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveRequest {
    pub speed: Option<f32>,
    pub time: Option<f32>,
    pub distance: Option<f32>,
}

impl MoveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed(mut self, rpm: f32) -> Self {
        self.speed = Some(rpm);
        self
    }

    pub fn time(mut self, seconds: f32) -> Self {
        self.time = Some(seconds);
        self
    }

    /// Distance in cm, or angle in degrees for turns
    pub fn distance(mut self, value: f32) -> Self {
        self.distance = Some(value);
        self
    }

    /// Alias of [`MoveRequest::distance`] that reads better for turns
    pub fn angle(self, degrees: f32) -> Self {
        self.distance(degrees)
    }
}

/// A fully resolved movement, built fresh for every call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementCommand {
    pub direction: Direction,
    pub speed: f32,
    pub magnitude: Magnitude,
}

impl MovementCommand {
    pub fn mode(&self) -> Mode {
        match self.magnitude {
            Magnitude::Time(_) => Mode::Time,
            Magnitude::Distance(_) => Mode::Distance,
        }
    }

    /// Sign applied to the magnitude at dispatch. Time is never signed.
    pub fn sign(&self) -> f32 {
        match self.magnitude {
            Magnitude::Time(_) => 1.0,
            Magnitude::Distance(_) => self.direction.distance_sign(),
        }
    }

    /// Distance or angle as handed to the motors, if this is a distance move
    pub fn signed_distance(&self) -> Option<f32> {
        match self.magnitude {
            Magnitude::Distance(d) => Some(self.sign() * d),
            Magnitude::Time(_) => None,
        }
    }

    /// Human-readable description shown on the display before dispatch
    pub fn status_line(&self) -> String {
        let head = format!(
            "{} {} at {} RPM",
            self.direction.verb(),
            self.direction,
            self.speed
        );
        match self.magnitude {
            Magnitude::Time(RunFor::Seconds(s)) => format!("{} for {} seconds", head, s),
            Magnitude::Time(RunFor::Indefinitely) => format!("{} until stopped", head),
            Magnitude::Distance(d) => {
                format!("{} for {} {}", head, d, self.direction.distance_unit())
            }
        }
    }
}

/// Absent or negative falls back to the default; above the ceiling clamps.
/// Zero is a valid speed.
pub fn resolve_speed(requested: Option<f32>, default: f32) -> f32 {
    match requested {
        Some(rpm) if rpm.is_nan() || rpm < 0.0 => default,
        Some(rpm) if rpm > MAX_SPEED_RPM => MAX_SPEED_RPM,
        Some(rpm) => rpm,
        None => default,
    }
}

/// Time wins over distance. A given time of zero or less runs indefinitely.
pub fn resolve_magnitude(
    time: Option<f32>,
    distance: Option<f32>,
    defaults: &RobotDefaults,
) -> Magnitude {
    match (time, distance) {
        (None, Some(d)) if d.is_nan() || d < 0.0 => Magnitude::Distance(defaults.distance()),
        (None, Some(d)) => Magnitude::Distance(d),
        (None, None) => Magnitude::Time(RunFor::Seconds(defaults.time())),
        (Some(t), _) if t > 0.0 => Magnitude::Time(RunFor::Seconds(t)),
        (Some(_), _) => Magnitude::Time(RunFor::Indefinitely),
    }
}

pub fn resolve(
    direction: Direction,
    request: &MoveRequest,
    defaults: &RobotDefaults,
) -> MovementCommand {
    MovementCommand {
        direction,
        speed: resolve_speed(request.speed, defaults.speed()),
        magnitude: resolve_magnitude(request.time, request.distance, defaults),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_resolution() {
        let default = 50.0;
        assert_eq!(resolve_speed(None, default), 50.0);
        assert_eq!(resolve_speed(Some(-5.0), default), 50.0);
        assert_eq!(resolve_speed(Some(250.0), default), 200.0);
        assert_eq!(resolve_speed(Some(0.0), default), 0.0);
        assert_eq!(resolve_speed(Some(120.0), default), 120.0);
        assert_eq!(resolve_speed(Some(f32::NAN), default), 50.0);
    }

    #[test]
    fn test_speed_always_in_range() {
        for rpm in [-1e6, -1.0, 0.0, 0.5, 200.0, 200.5, 1e6] {
            let speed = resolve_speed(Some(rpm), 50.0);
            assert!((0.0..=200.0).contains(&speed), "{} -> {}", rpm, speed);
        }
    }

    #[test]
    fn test_non_positive_time_runs_indefinitely() {
        let defaults = RobotDefaults::default();
        for t in [0.0, -0.1, -10.0] {
            assert_eq!(
                resolve_magnitude(Some(t), None, &defaults),
                Magnitude::Time(RunFor::Indefinitely)
            );
        }
    }

    #[test]
    fn test_positive_time_is_kept() {
        let defaults = RobotDefaults::default();
        assert_eq!(
            resolve_magnitude(Some(0.5), None, &defaults),
            Magnitude::Time(RunFor::Seconds(0.5))
        );
    }

    #[test]
    fn test_defaults_when_nothing_given() {
        let cmd = resolve(Direction::Forward, &MoveRequest::new(), &RobotDefaults::default());
        assert_eq!(cmd.mode(), Mode::Time);
        assert_eq!(cmd.magnitude, Magnitude::Time(RunFor::Seconds(1.0)));
        assert_eq!(cmd.speed, 50.0);
        assert_eq!(cmd.sign(), 1.0);
    }

    #[test]
    fn test_time_wins_over_distance() {
        let request = MoveRequest::new().speed(25.0).time(2.0).distance(5.0);
        let cmd = resolve(Direction::Left, &request, &RobotDefaults::default());
        assert_eq!(cmd.magnitude, Magnitude::Time(RunFor::Seconds(2.0)));
        assert_eq!(cmd.signed_distance(), None);
    }

    #[test]
    fn test_time_zero_with_distance_still_indefinite() {
        let request = MoveRequest::new().time(0.0).distance(5.0);
        let cmd = resolve(Direction::Forward, &request, &RobotDefaults::default());
        assert_eq!(cmd.magnitude, Magnitude::Time(RunFor::Indefinitely));
    }

    #[test]
    fn test_negative_distance_uses_default() {
        let request = MoveRequest::new().distance(-7.0);
        let cmd = resolve(Direction::Backward, &request, &RobotDefaults::default());
        assert_eq!(cmd.magnitude, Magnitude::Distance(16.0));
        assert_eq!(cmd.signed_distance(), Some(-16.0));
    }

    #[test]
    fn test_distance_signs() {
        let defaults = RobotDefaults::default();

        let backward = resolve(Direction::Backward, &MoveRequest::new().distance(5.0), &defaults);
        assert_eq!(backward.signed_distance(), Some(-5.0));

        let left = resolve(Direction::Left, &MoveRequest::new().angle(90.0), &defaults);
        assert_eq!(left.signed_distance(), Some(-90.0));

        let right = resolve(Direction::Right, &MoveRequest::new().angle(90.0), &defaults);
        assert_eq!(right.signed_distance(), Some(90.0));

        let forward = resolve(Direction::Forward, &MoveRequest::new().distance(32.0), &defaults);
        assert_eq!(forward.signed_distance(), Some(32.0));
    }

    #[test]
    fn test_time_is_never_signed() {
        let cmd = resolve(
            Direction::Backward,
            &MoveRequest::new().time(3.0),
            &RobotDefaults::default(),
        );
        assert_eq!(cmd.sign(), 1.0);
        assert_eq!(cmd.magnitude, Magnitude::Time(RunFor::Seconds(3.0)));
    }

    #[test]
    fn test_status_lines() {
        let defaults = RobotDefaults::default();

        let cmd = resolve(Direction::Forward, &MoveRequest::new(), &defaults);
        assert_eq!(cmd.status_line(), "Moving forward at 50 RPM for 1 seconds");

        let cmd = resolve(Direction::Backward, &MoveRequest::new().distance(5.0), &defaults);
        assert_eq!(cmd.status_line(), "Moving backward at 50 RPM for 5 cm");

        let cmd = resolve(Direction::Left, &MoveRequest::new().angle(90.0), &defaults);
        assert_eq!(cmd.status_line(), "Turning left at 50 RPM for 90 degrees");

        let cmd = resolve(
            Direction::Right,
            &MoveRequest::new().speed(25.0).time(-1.0),
            &defaults,
        );
        assert_eq!(cmd.status_line(), "Turning right at 25 RPM until stopped");

        let cmd = resolve(
            Direction::Forward,
            &MoveRequest::new().speed(150.0).time(0.5),
            &defaults,
        );
        assert_eq!(cmd.status_line(), "Moving forward at 150 RPM for 0.5 seconds");
    }
}
