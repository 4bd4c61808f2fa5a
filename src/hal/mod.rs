// Collaborator interfaces for the robot hardware
//
// The controller only talks to these traits. The zenoh bus implementation
// lives in `crate::bus`, the HTTP client in `crate::http`.

#[cfg(test)]
pub(crate) mod recording;

use crate::motion::RunFor;

/// Error types for collaborator calls
#[derive(Debug, thiserror::Error)]
pub enum HalError {
    #[error("Bus error: {0}")]
    Bus(String),

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, HalError>;

/// Chassis motor primitives, one per direction and mode.
///
/// Timed moves take an unsigned duration. `straight` and `turn` take a signed
/// magnitude: negative cm drives backward, negative degrees turns left.
pub trait MotorControl {
    fn forward(&mut self, rpm: f32, run: RunFor) -> Result<()>;
    fn backward(&mut self, rpm: f32, run: RunFor) -> Result<()>;
    fn turn_left(&mut self, rpm: f32, run: RunFor) -> Result<()>;
    fn turn_right(&mut self, rpm: f32, run: RunFor) -> Result<()>;
    fn straight(&mut self, cm: f32, rpm: f32) -> Result<()>;
    fn turn(&mut self, degrees: f32, rpm: f32) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

pub trait Display {
    fn clear(&mut self) -> Result<()>;
    fn println(&mut self, text: &str) -> Result<()>;
}

pub trait Audio {
    fn play(&mut self, sound: &str) -> Result<()>;
}

pub trait NetworkStatus {
    fn is_connected(&mut self) -> bool;
    fn connect(&mut self, ssid: &str, password: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
}

pub trait HttpClient {
    fn get(&mut self, url: &str) -> Result<HttpResponse>;
}

/// Everything the controller needs from the robot board
pub trait Board: MotorControl + Display + Audio + NetworkStatus {}

impl<T: MotorControl + Display + Audio + NetworkStatus> Board for T {}
