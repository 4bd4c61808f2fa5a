// Test doubles that record every collaborator call

use super::{Audio, Display, HalError, HttpClient, HttpResponse, MotorControl, NetworkStatus, Result};
use crate::motion::RunFor;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Forward { rpm: f32, run: RunFor },
    Backward { rpm: f32, run: RunFor },
    TurnLeft { rpm: f32, run: RunFor },
    TurnRight { rpm: f32, run: RunFor },
    Straight { cm: f32, rpm: f32 },
    Turn { degrees: f32, rpm: f32 },
    Stop,
    Clear,
    Println(String),
    Play(String),
    Connect { ssid: String, password: String },
}

impl Call {
    pub fn is_motor(&self) -> bool {
        matches!(
            self,
            Call::Forward { .. }
                | Call::Backward { .. }
                | Call::TurnLeft { .. }
                | Call::TurnRight { .. }
                | Call::Straight { .. }
                | Call::Turn { .. }
                | Call::Stop
        )
    }
}

#[derive(Debug, Default)]
pub struct RecordingBoard {
    pub calls: Vec<Call>,
    /// Number of connect attempts after which the link comes up.
    /// `None` keeps the link permanently up.
    pub connect_after: Option<usize>,
    /// Make every connect call return an error
    pub fail_connect: bool,
    /// Fail the next println of exactly this text, without recording it
    pub fail_println_once: Option<String>,
    connect_attempts: usize,
}

impl RecordingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A board whose link comes up on the given connect attempt
    pub fn offline_until(attempt: usize) -> Self {
        Self {
            connect_after: Some(attempt),
            ..Self::default()
        }
    }

    pub fn motor_calls(&self) -> Vec<Call> {
        self.calls.iter().filter(|c| c.is_motor()).cloned().collect()
    }

    pub fn printed(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Println(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn connect_attempts(&self) -> usize {
        self.connect_attempts
    }
}

impl MotorControl for RecordingBoard {
    fn forward(&mut self, rpm: f32, run: RunFor) -> Result<()> {
        self.calls.push(Call::Forward { rpm, run });
        Ok(())
    }

    fn backward(&mut self, rpm: f32, run: RunFor) -> Result<()> {
        self.calls.push(Call::Backward { rpm, run });
        Ok(())
    }

    fn turn_left(&mut self, rpm: f32, run: RunFor) -> Result<()> {
        self.calls.push(Call::TurnLeft { rpm, run });
        Ok(())
    }

    fn turn_right(&mut self, rpm: f32, run: RunFor) -> Result<()> {
        self.calls.push(Call::TurnRight { rpm, run });
        Ok(())
    }

    fn straight(&mut self, cm: f32, rpm: f32) -> Result<()> {
        self.calls.push(Call::Straight { cm, rpm });
        Ok(())
    }

    fn turn(&mut self, degrees: f32, rpm: f32) -> Result<()> {
        self.calls.push(Call::Turn { degrees, rpm });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.calls.push(Call::Stop);
        Ok(())
    }
}

impl Display for RecordingBoard {
    fn clear(&mut self) -> Result<()> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn println(&mut self, text: &str) -> Result<()> {
        if self.fail_println_once.as_deref() == Some(text) {
            self.fail_println_once = None;
            return Err(HalError::Bus("display dropped".to_string()));
        }
        self.calls.push(Call::Println(text.to_string()));
        Ok(())
    }
}

impl Audio for RecordingBoard {
    fn play(&mut self, sound: &str) -> Result<()> {
        self.calls.push(Call::Play(sound.to_string()));
        Ok(())
    }
}

impl NetworkStatus for RecordingBoard {
    fn is_connected(&mut self) -> bool {
        match self.connect_after {
            None => true,
            Some(n) => self.connect_attempts >= n,
        }
    }

    fn connect(&mut self, ssid: &str, password: &str) -> Result<()> {
        self.connect_attempts += 1;
        self.calls.push(Call::Connect {
            ssid: ssid.to_string(),
            password: password.to_string(),
        });
        if self.fail_connect {
            return Err(HalError::Bus("radio unavailable".to_string()));
        }
        Ok(())
    }
}

/// HTTP client returning a canned status, or an error when `status` is `None`
#[derive(Debug, Default)]
pub struct RecordingHttp {
    pub status: Option<u16>,
    pub requested: Vec<String>,
}

impl RecordingHttp {
    pub fn responding(status: u16) -> Self {
        Self {
            status: Some(status),
            requested: Vec::new(),
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }
}

impl HttpClient for RecordingHttp {
    fn get(&mut self, url: &str) -> Result<HttpResponse> {
        self.requested.push(url.to_string());
        match self.status {
            Some(status) => Ok(HttpResponse { status }),
            None => Err(HalError::Http("connection refused".to_string())),
        }
    }
}
