use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mbot_neo_runtime::config::Settings;
use mbot_neo_runtime::runtime::{self, WifiMode};

#[derive(Parser, Debug)]
#[command(name = "mbot-neo-runtime", about = "Button-driven movement runtime for the mBot Neo")]
struct Args {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wi-Fi network name, overrides the settings file
    #[arg(long)]
    ssid: Option<String>,

    /// Wi-Fi password, overrides the settings file
    #[arg(long)]
    password: Option<String>,

    /// Skip the Wi-Fi connect loop
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => {
            info!("Loading settings from {}", path.display());
            match Settings::load(path) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Failed to load {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => Settings::default(),
    };
    if let Some(ssid) = args.ssid {
        settings.wifi.ssid = ssid;
    }
    if let Some(password) = args.password {
        settings.wifi.password = password;
    }

    let wifi = if args.offline { WifiMode::Skip } else { WifiMode::Connect };
    if let Err(e) = runtime::run(settings, wifi).await {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
