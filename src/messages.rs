// Message types exchanged with the hardware bridge

use serde::{Deserialize, Serialize};

use crate::buttons::Button;

// Runtime -> bridge: one message per motor primitive.
// `seconds` is omitted for moves that run until stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MotorCommand {
    Forward {
        rpm: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seconds: Option<f32>,
    },
    Backward {
        rpm: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seconds: Option<f32>,
    },
    TurnLeft {
        rpm: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seconds: Option<f32>,
    },
    TurnRight {
        rpm: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seconds: Option<f32>,
    },
    // Signed: negative cm drives backward
    Straight { cm: f32, rpm: f32 },
    // Signed: negative degrees turns counter-clockwise
    Turn { degrees: f32, rpm: f32 },
    Stop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DisplayCommand {
    Clear,
    Println { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AudioCommand {
    Play { sound: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WifiCommand {
    Connect { ssid: String, password: String },
}

/// Link state published by the bridge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum WifiState {
    Connected,
    Disconnected,
}

// Bridge -> runtime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonPress {
    pub button: Button,
}
