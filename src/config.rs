// Topics, movement defaults, Wi-Fi timing and the optional TOML settings file
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Zenoh topics
pub const TOPIC_CMD_MOTOR: &str = "mbot/cmd/motor"; // motor primitives
pub const TOPIC_CMD_DISPLAY: &str = "mbot/cmd/display"; // screen output
pub const TOPIC_CMD_AUDIO: &str = "mbot/cmd/audio"; // sounds
pub const TOPIC_CMD_WIFI: &str = "mbot/cmd/wifi"; // connect requests
pub const TOPIC_STATE_WIFI: &str = "mbot/state/wifi"; // link state from the bridge
pub const TOPIC_EVENT_BUTTON: &str = "mbot/event/button"; // button presses from the bridge

// Movement defaults
pub const DEFAULT_SPEED_RPM: f32 = 50.0;
pub const MAX_SPEED_RPM: f32 = 200.0;
pub const DEFAULT_TIME_S: f32 = 1.0;
pub const DEFAULT_DISTANCE_CM: f32 = 16.0;

// Wi-Fi
pub const WIFI_SSID: &str = "your_wifi_ssid";
pub const WIFI_PASSWORD: &str = "your_wifi_password";
pub const WIFI_RETRY_INTERVAL: Duration = Duration::from_secs(1);
// How long a connect request waits for the bridge to report link state
pub const WIFI_SETTLE_TIMEOUT: Duration = Duration::from_millis(500);
pub const CONNECTED_SOUND: &str = "level-up";

// Button loop poll period, bounds how quickly Ctrl+C is noticed
pub const BUTTON_POLL: Duration = Duration::from_millis(100);

// Only plain http is supported by the test request
pub const DEFAULT_TEST_URL: &str = "http://google.com";
// Upper bound on the whole test request, connect included
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Runtime settings, loaded from TOML. Every section and key is optional.
///
/// ```toml
/// [wifi]
/// ssid = "classroom"
/// password = "secret"
/// retry_interval_ms = 1000
///
/// [defaults]
/// speed = 80
/// time = 2.0
/// distance = 20
///
/// [http]
/// test_url = "http://example.com"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub wifi: WifiSettings,
    pub defaults: DefaultSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiSettings {
    pub ssid: String,
    pub password: String,
    pub retry_interval_ms: u64,
}

impl Default for WifiSettings {
    fn default() -> Self {
        Self {
            ssid: WIFI_SSID.to_string(),
            password: WIFI_PASSWORD.to_string(),
            retry_interval_ms: WIFI_RETRY_INTERVAL.as_millis() as u64,
        }
    }
}

impl WifiSettings {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}

/// Initial movement defaults. These go through the regular setters, so
/// out-of-range values are coerced the same way as at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    pub speed: f32,
    pub time: f32,
    pub distance: f32,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED_RPM,
            time: DEFAULT_TIME_S,
            distance: DEFAULT_DISTANCE_CM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub test_url: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            test_url: DEFAULT_TEST_URL.to_string(),
        }
    }
}

impl Settings {
    /// Read and parse a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
