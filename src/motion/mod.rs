// Movement module for the mBot Neo chassis
//
// Provides:
// - Stored movement defaults with range-checked setters
// - Resolution of direction/speed/time/distance requests into concrete commands

mod defaults;
pub mod resolver;

pub use defaults::RobotDefaults;
pub use resolver::{
    resolve, resolve_magnitude, resolve_speed, Direction, Magnitude, Mode, MoveRequest,
    MovementCommand, RunFor,
};
