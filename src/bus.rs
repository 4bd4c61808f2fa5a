// Board collaborators backed by the zenoh bus
//
// Every call becomes a JSON message to the hardware bridge. Calls use the
// synchronous zenoh API, so a `BusBoard` must be driven from a blocking
// thread, never from inside an async task.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};
use zenoh::handlers::FifoChannelHandler;
use zenoh::pubsub::{Publisher, Subscriber};
use zenoh::sample::Sample;
use zenoh::{Session, Wait};

use crate::config::{
    TOPIC_CMD_AUDIO, TOPIC_CMD_DISPLAY, TOPIC_CMD_MOTOR, TOPIC_CMD_WIFI, TOPIC_STATE_WIFI,
    WIFI_SETTLE_TIMEOUT,
};
use crate::hal::{Audio, Display, HalError, MotorControl, NetworkStatus, Result};
use crate::messages::{AudioCommand, DisplayCommand, MotorCommand, WifiCommand, WifiState};
use crate::motion::RunFor;

fn bus_error(e: impl std::fmt::Display) -> HalError {
    HalError::Bus(e.to_string())
}

fn publish<T: Serialize>(publisher: &Publisher<'static>, msg: &T) -> Result<()> {
    let json = serde_json::to_string(msg)?;
    debug!("Publishing to {}: {}", publisher.key_expr(), json);
    publisher.put(json).wait().map_err(bus_error)
}

pub struct BusBoard {
    motor: Publisher<'static>,
    display: Publisher<'static>,
    audio: Publisher<'static>,
    wifi: Publisher<'static>,
    wifi_state: Subscriber<FifoChannelHandler<Sample>>,
    connected: bool,
    settle_timeout: Duration,
}

impl BusBoard {
    /// Declare all publishers and the Wi-Fi state subscriber on `session`
    pub fn declare(session: &Session) -> Result<Self> {
        info!("Declaring bridge topics...");
        let motor = session.declare_publisher(TOPIC_CMD_MOTOR).wait().map_err(bus_error)?;
        let display = session.declare_publisher(TOPIC_CMD_DISPLAY).wait().map_err(bus_error)?;
        let audio = session.declare_publisher(TOPIC_CMD_AUDIO).wait().map_err(bus_error)?;
        let wifi = session.declare_publisher(TOPIC_CMD_WIFI).wait().map_err(bus_error)?;
        let wifi_state = session
            .declare_subscriber(TOPIC_STATE_WIFI)
            .wait()
            .map_err(bus_error)?;

        Ok(Self {
            motor,
            display,
            audio,
            wifi,
            wifi_state,
            connected: false,
            settle_timeout: WIFI_SETTLE_TIMEOUT,
        })
    }

    fn apply_state(&mut self, sample: &Sample) {
        let payload = sample.payload().to_bytes();
        match serde_json::from_slice::<WifiState>(&payload) {
            Ok(state) => {
                debug!("Bridge reports WiFi {:?}", state);
                self.connected = state == WifiState::Connected;
            }
            Err(e) => warn!("Failed to parse WiFi state: {}", e),
        }
    }

    // Keep only the latest state the bridge has published
    fn drain_state(&mut self) {
        while let Ok(Some(sample)) = self.wifi_state.try_recv() {
            self.apply_state(&sample);
        }
    }

    fn send_motor(&self, cmd: MotorCommand) -> Result<()> {
        publish(&self.motor, &cmd)
    }
}

impl MotorControl for BusBoard {
    fn forward(&mut self, rpm: f32, run: RunFor) -> Result<()> {
        self.send_motor(MotorCommand::Forward { rpm, seconds: run.seconds() })
    }

    fn backward(&mut self, rpm: f32, run: RunFor) -> Result<()> {
        self.send_motor(MotorCommand::Backward { rpm, seconds: run.seconds() })
    }

    fn turn_left(&mut self, rpm: f32, run: RunFor) -> Result<()> {
        self.send_motor(MotorCommand::TurnLeft { rpm, seconds: run.seconds() })
    }

    fn turn_right(&mut self, rpm: f32, run: RunFor) -> Result<()> {
        self.send_motor(MotorCommand::TurnRight { rpm, seconds: run.seconds() })
    }

    fn straight(&mut self, cm: f32, rpm: f32) -> Result<()> {
        self.send_motor(MotorCommand::Straight { cm, rpm })
    }

    fn turn(&mut self, degrees: f32, rpm: f32) -> Result<()> {
        self.send_motor(MotorCommand::Turn { degrees, rpm })
    }

    fn stop(&mut self) -> Result<()> {
        self.send_motor(MotorCommand::Stop)
    }
}

impl Display for BusBoard {
    fn clear(&mut self) -> Result<()> {
        publish(&self.display, &DisplayCommand::Clear)
    }

    fn println(&mut self, text: &str) -> Result<()> {
        publish(&self.display, &DisplayCommand::Println { text: text.to_string() })
    }
}

impl Audio for BusBoard {
    fn play(&mut self, sound: &str) -> Result<()> {
        publish(&self.audio, &AudioCommand::Play { sound: sound.to_string() })
    }
}

impl NetworkStatus for BusBoard {
    fn is_connected(&mut self) -> bool {
        self.drain_state();
        self.connected
    }

    fn connect(&mut self, ssid: &str, password: &str) -> Result<()> {
        let request = WifiCommand::Connect {
            ssid: ssid.to_string(),
            password: password.to_string(),
        };
        publish(&self.wifi, &request)?;

        // Give the bridge a moment to answer before the caller checks the link
        match self.wifi_state.recv_timeout(self.settle_timeout) {
            Ok(Some(sample)) => self.apply_state(&sample),
            Ok(None) => debug!("No WiFi state within {:?}", self.settle_timeout),
            Err(e) => return Err(bus_error(e)),
        }
        Ok(())
    }
}

impl Drop for BusBoard {
    fn drop(&mut self) {
        // Motors must not keep running once nothing can stop them
        if let Err(e) = MotorControl::stop(self) {
            warn!("Failed to stop motors on drop: {}", e);
        }
    }
}
