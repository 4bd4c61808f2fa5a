// Button event loop
// Note: handlers run one at a time on a single blocking thread, so the
// controller's defaults need no locking

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{info, warn};
use zenoh::{Session, Wait};

use crate::buttons::ButtonRegistry;
use crate::bus::BusBoard;
use crate::config::{Settings, BUTTON_POLL, HTTP_TIMEOUT, TOPIC_EVENT_BUTTON};
use crate::demo::{self, App};
use crate::http::HyperClient;
use crate::messages::ButtonPress;
use crate::robot::{MbotNeo, WifiLink};

pub type RuntimeError = Box<dyn std::error::Error + Send + Sync>;

/// Whether startup runs the Wi-Fi connect loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WifiMode {
    #[default]
    Connect,
    Skip,
}

pub async fn run(settings: Settings, wifi: WifiMode) -> Result<(), RuntimeError> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, shutting down (press again to force)");
            flag.store(true, Ordering::Relaxed);
        }
        // A handler stuck in a blocking call must not keep the process alive
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Second Ctrl+C, exiting immediately");
            std::process::exit(130);
        }
    });

    let handle = Handle::current();
    tokio::task::spawn_blocking(move || event_loop(session, handle, settings, wifi, shutdown))
        .await??;

    info!("Runtime stopped");
    Ok(())
}

fn event_loop(
    session: Session,
    handle: Handle,
    settings: Settings,
    wifi: WifiMode,
    shutdown: Arc<AtomicBool>,
) -> Result<(), RuntimeError> {
    let board = BusBoard::declare(&session)?;
    let mut robot = MbotNeo::from_settings(board, &settings);
    info!(
        "Defaults: {} RPM, {} s, {} cm",
        robot.defaults().speed(),
        robot.defaults().time(),
        robot.defaults().distance()
    );

    if wifi == WifiMode::Connect {
        let link = robot.connect_wifi_until(&settings.wifi.ssid, &settings.wifi.password, || {
            shutdown.load(Ordering::Relaxed)
        });
        if link == WifiLink::Cancelled {
            robot.stop()?;
            return Ok(());
        }
    }

    let mut app = App {
        robot,
        http: HyperClient::new(handle, HTTP_TIMEOUT),
        test_url: settings.http.test_url.clone(),
    };
    demo::startup_banner(&mut app.robot)?;

    let mut registry = ButtonRegistry::new();
    demo::register_handlers(&mut registry);

    let buttons = session.declare_subscriber(TOPIC_EVENT_BUTTON).wait()?;
    info!("Subscribed to: {}", TOPIC_EVENT_BUTTON);

    while !shutdown.load(Ordering::Relaxed) {
        let sample = match buttons.recv_timeout(BUTTON_POLL) {
            Ok(Some(sample)) => sample,
            Ok(None) => continue,
            Err(e) => {
                warn!("Button subscriber closed: {}", e);
                break;
            }
        };

        let payload = sample.payload().to_bytes();
        match serde_json::from_slice::<ButtonPress>(&payload) {
            Ok(press) => {
                info!("Button {} pressed", press.button);
                if !registry.dispatch(press.button, &mut app) {
                    warn!("No handler bound to button {}", press.button);
                }
            }
            Err(e) => {
                warn!("Failed to parse button press: {}", e);
            }
        }
    }

    app.robot.stop()?;
    Ok(())
}
