// Simulated hardware bridge: A/B press the robot's buttons, Q quits.
// Shows display lines, logs motor and audio commands, and answers Wi-Fi
// connect requests as if the robot joined the network.
//
// `--press a --press b` sends scripted presses instead of reading keys.
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::time::Duration;
use tracing::{info, warn};
use zenoh::handlers::FifoChannelHandler;
use zenoh::pubsub::Subscriber;
use zenoh::sample::Sample;

use mbot_neo_runtime::buttons::Button;
use mbot_neo_runtime::config::{
    TOPIC_CMD_AUDIO, TOPIC_CMD_DISPLAY, TOPIC_CMD_MOTOR, TOPIC_CMD_WIFI, TOPIC_EVENT_BUTTON,
    TOPIC_STATE_WIFI,
};
use mbot_neo_runtime::messages::{
    AudioCommand, ButtonPress, DisplayCommand, MotorCommand, WifiCommand, WifiState,
};

type Inbox = Subscriber<FifoChannelHandler<Sample>>;

#[derive(Parser, Debug)]
#[command(name = "sim_bridge", about = "Simulated mBot Neo hardware bridge")]
struct Args {
    /// Press these buttons in order, then exit
    #[arg(long = "press", value_name = "BUTTON")]
    presses: Vec<Button>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let buttons = session.declare_publisher(TOPIC_EVENT_BUTTON).await?;

    if !args.presses.is_empty() {
        for button in args.presses {
            info!("Button {} pressed", button);
            let json = serde_json::to_string(&ButtonPress { button })?;
            buttons.put(json).await?;
        }
        return Ok(());
    }

    let wifi_state = session.declare_publisher(TOPIC_STATE_WIFI).await?;

    let motor = session.declare_subscriber(TOPIC_CMD_MOTOR).await?;
    let display = session.declare_subscriber(TOPIC_CMD_DISPLAY).await?;
    let audio = session.declare_subscriber(TOPIC_CMD_AUDIO).await?;
    let wifi = session.declare_subscriber(TOPIC_CMD_WIFI).await?;

    info!("Controls: A/B = press button, Q = quit");

    enable_raw_mode()?;
    let result = run_bridge(&buttons, &wifi_state, [&motor, &display, &audio, &wifi]).await;
    disable_raw_mode()?;

    result
}

async fn run_bridge(
    buttons: &zenoh::pubsub::Publisher<'_>,
    wifi_state: &zenoh::pubsub::Publisher<'_>,
    [motor, display, audio, wifi]: [&Inbox; 4],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    loop {
        // Poll for key with 20ms timeout (50Hz effective rate)
        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                if kind == KeyEventKind::Press {
                    let button = match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            info!("Quitting");
                            return Ok(());
                        }
                        KeyCode::Char(c) => c.to_string().parse::<Button>().ok(),
                        _ => None,
                    };
                    if let Some(button) = button {
                        info!("Button {} pressed", button);
                        let json = serde_json::to_string(&ButtonPress { button })?;
                        buttons.put(json).await?;
                    }
                }
            }
        }

        for sample in drain(wifi) {
            match serde_json::from_slice::<WifiCommand>(&sample.payload().to_bytes()) {
                Ok(WifiCommand::Connect { ssid, .. }) => {
                    info!("[wifi] joining {:?}", ssid);
                    let json = serde_json::to_string(&WifiState::Connected)?;
                    wifi_state.put(json).await?;
                }
                Err(e) => warn!("Failed to parse wifi command: {}", e),
            }
        }

        for sample in drain(display) {
            match serde_json::from_slice::<DisplayCommand>(&sample.payload().to_bytes()) {
                Ok(DisplayCommand::Clear) => info!("[display] ----------------"),
                Ok(DisplayCommand::Println { text }) => info!("[display] {}", text),
                Err(e) => warn!("Failed to parse display command: {}", e),
            }
        }

        for sample in drain(motor) {
            match serde_json::from_slice::<MotorCommand>(&sample.payload().to_bytes()) {
                Ok(cmd) => info!("[motor] {:?}", cmd),
                Err(e) => warn!("Failed to parse motor command: {}", e),
            }
        }

        for sample in drain(audio) {
            match serde_json::from_slice::<AudioCommand>(&sample.payload().to_bytes()) {
                Ok(AudioCommand::Play { sound }) => info!("[audio] {}", sound),
                Err(e) => warn!("Failed to parse audio command: {}", e),
            }
        }
    }
}

// Non-blocking: everything already queued on a subscriber
fn drain(inbox: &Inbox) -> Vec<Sample> {
    let mut samples = Vec::new();
    while let Ok(Some(sample)) = inbox.try_recv() {
        samples.push(sample);
    }
    samples
}
