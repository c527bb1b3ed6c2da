//! Input activity reporter for the ostinato ingestion service.
//!
//! This binary counts keyboard and mouse events from Linux evdev devices
//! and POSTs an activity record to the service at a fixed interval.
//!
//! **Requires Linux.** Reading `/dev/input/event*` usually needs root or
//! membership in the `input` group. On other platforms, build succeeds but
//! the agent cannot be started.

#[cfg(target_os = "linux")]
mod input;
#[cfg(target_os = "linux")]
mod report;

use std::path::PathBuf;

use clap::Parser;

/// ostinato-agent — keyboard/mouse activity reporter.
#[derive(Parser)]
#[command(name = "ostinato-agent", version, about)]
struct Cli {
    /// Base URL of the ingestion service, e.g. http://localhost:5001.
    #[arg(long)]
    url: String,

    /// Seconds between reports.
    #[arg(long, default_value = "30")]
    interval: u64,

    /// Keyboard event device (auto-discovered when omitted).
    #[arg(long)]
    keyboard_device: Option<PathBuf>,

    /// Mouse event device (auto-discovered when omitted).
    #[arg(long)]
    mouse_device: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    #[cfg(target_os = "linux")]
    {
        if let Err(e) = run_agent(cli) {
            tracing::error!("agent failed: {e}");
            std::process::exit(1);
        }
    }

    #[cfg(not(target_os = "linux"))]
    {
        let _ = cli;
        eprintln!("ostinato-agent reads /dev/input event devices and requires Linux.");
        eprintln!("This binary was built on a non-Linux platform and cannot start.");
        std::process::exit(1);
    }
}

#[cfg(target_os = "linux")]
fn run_agent(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let keyboard = match cli.keyboard_device {
        Some(path) => path,
        None => input::find_keyboard_device()?,
    };
    let mouse = match cli.mouse_device {
        Some(path) => path,
        None => input::find_mouse_device()?,
    };

    tracing::info!("counting keyboard events from {}", keyboard.display());
    tracing::info!("counting mouse events from {}", mouse.display());

    let counters = input::spawn_readers(&keyboard, &mouse)?;

    let config = report::ReportConfig::new(&cli.url, std::time::Duration::from_secs(cli.interval));
    tracing::info!(
        "reporting to {} every {}s",
        config.endpoint,
        cli.interval
    );

    report::run(&config, &counters)
}
