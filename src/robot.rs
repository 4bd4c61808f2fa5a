// Controller for the mBot Neo
//
// Owns the stored movement defaults and the board collaborators. Every
// movement call is resolved, announced on the display, then dispatched to
// exactly one motor primitive.

use std::thread::sleep;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{Settings, CONNECTED_SOUND, WIFI_RETRY_INTERVAL};
use crate::hal::{Board, Result};
use crate::motion::{resolve, Direction, Magnitude, MoveRequest, MovementCommand, RobotDefaults};

/// How a Wi-Fi connect loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiLink {
    Connected,
    Cancelled,
}

pub struct MbotNeo<B: Board> {
    board: B,
    defaults: RobotDefaults,
    retry_interval: Duration,
}

impl<B: Board> MbotNeo<B> {
    /// Create a controller with the built-in defaults (50 RPM, 1 s, 16 cm)
    pub fn new(board: B) -> Self {
        Self {
            board,
            defaults: RobotDefaults::default(),
            retry_interval: WIFI_RETRY_INTERVAL,
        }
    }

    /// Create a controller whose initial defaults and Wi-Fi timing come from settings
    pub fn from_settings(board: B, settings: &Settings) -> Self {
        let mut robot = Self::new(board).with_retry_interval(settings.wifi.retry_interval());
        robot.set_speed(settings.defaults.speed);
        robot.set_time(settings.defaults.time);
        robot.set_distance(settings.defaults.distance);
        robot
    }

    /// Pause between Wi-Fi connect attempts
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn defaults(&self) -> &RobotDefaults {
        &self.defaults
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn set_speed(&mut self, rpm: f32) {
        self.defaults.set_speed(rpm);
        debug!("Default speed now {} RPM", self.defaults.speed());
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.defaults.set_time(seconds);
        debug!("Default time now {} s", self.defaults.time());
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.defaults.set_distance(distance);
        debug!("Default distance now {}", self.defaults.distance());
    }

    /// Clear the screen and show one line
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.board.clear()?;
        self.board.println(text)
    }

    /// Append a line below the current screen contents
    pub fn print_line(&mut self, text: &str) -> Result<()> {
        self.board.println(text)
    }

    /// Block until the board reports a Wi-Fi link, retrying forever.
    pub fn connect_wifi(&mut self, ssid: &str, password: &str) -> WifiLink {
        self.connect_wifi_until(ssid, password, || false)
    }

    /// Like [`MbotNeo::connect_wifi`], but gives up once `cancelled` returns
    /// true. The flag is checked before every attempt.
    ///
    /// Nothing in the loop is fatal: failed attempts, sounds and status lines
    /// are logged and the loop carries on.
    pub fn connect_wifi_until(
        &mut self,
        ssid: &str,
        password: &str,
        cancelled: impl Fn() -> bool,
    ) -> WifiLink {
        info!("Connecting to WiFi network {:?}", ssid);
        self.show_status("Connecting to WiFi...");

        while !self.board.is_connected() {
            if cancelled() {
                info!("WiFi connect cancelled");
                return WifiLink::Cancelled;
            }
            if let Err(e) = self.board.connect(ssid, password) {
                warn!("WiFi connect attempt failed: {}", e);
            }
            if self.board.is_connected() {
                if let Err(e) = self.board.play(CONNECTED_SOUND) {
                    warn!("Failed to play connect sound: {}", e);
                }
                break;
            }
            sleep(self.retry_interval);
            self.show_status("Unable to connect to WiFi. Retrying...");
        }

        self.show_status("Connected to WiFi");
        info!("WiFi connected");
        WifiLink::Connected
    }

    // Status output that must never interrupt the caller
    fn show_status(&mut self, text: &str) {
        if let Err(e) = self.print(text) {
            warn!("Failed to show {:?}: {}", text, e);
        }
    }

    /// Move forward for a time (seconds) or distance (cm)
    pub fn move_forward(&mut self, request: MoveRequest) -> Result<MovementCommand> {
        self.drive(Direction::Forward, request)
    }

    /// Move backward for a time (seconds) or distance (cm)
    pub fn move_backward(&mut self, request: MoveRequest) -> Result<MovementCommand> {
        self.drive(Direction::Backward, request)
    }

    /// Turn counter-clockwise for a time (seconds) or angle (degrees)
    pub fn turn_left(&mut self, request: MoveRequest) -> Result<MovementCommand> {
        self.drive(Direction::Left, request)
    }

    /// Turn clockwise for a time (seconds) or angle (degrees)
    pub fn turn_right(&mut self, request: MoveRequest) -> Result<MovementCommand> {
        self.drive(Direction::Right, request)
    }

    /// Halt the motors. Safe to call any number of times.
    pub fn stop(&mut self) -> Result<()> {
        info!("Stopping motors");
        self.board.stop()
    }

    /// Resolve, announce and dispatch one movement
    pub fn drive(&mut self, direction: Direction, request: MoveRequest) -> Result<MovementCommand> {
        let command = resolve(direction, &request, &self.defaults);
        let status = command.status_line();
        info!("{}", status);
        self.print(&status)?;
        self.dispatch(&command)?;
        Ok(command)
    }

    fn dispatch(&mut self, command: &MovementCommand) -> Result<()> {
        let rpm = command.speed;
        let sign = command.sign();
        match (command.direction, command.magnitude) {
            (Direction::Forward, Magnitude::Time(run)) => self.board.forward(rpm, run),
            (Direction::Backward, Magnitude::Time(run)) => self.board.backward(rpm, run),
            (Direction::Left, Magnitude::Time(run)) => self.board.turn_left(rpm, run),
            (Direction::Right, Magnitude::Time(run)) => self.board.turn_right(rpm, run),
            (Direction::Forward, Magnitude::Distance(cm)) => self.board.straight(sign * cm, rpm),
            (Direction::Backward, Magnitude::Distance(cm)) => self.board.straight(sign * cm, rpm),
            (Direction::Left, Magnitude::Distance(deg)) => self.board.turn(sign * deg, rpm),
            (Direction::Right, Magnitude::Distance(deg)) => self.board.turn(sign * deg, rpm),
        }
    }
}
