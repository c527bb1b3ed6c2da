//! HTTP ingestion service for keyboard/mouse activity telemetry.
//!
//! Accepts activity records over HTTP, retains the most recent fixed-size
//! window in an [`ostinato::RingStore`], and snapshots the window to disk
//! after every accepted record so it survives restarts.

mod api;

use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ostinato::{ActivityRecord, RingStore};

/// ostinato-server — activity telemetry ingestion service.
#[derive(Parser)]
#[command(name = "ostinato-server", version, about)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:5001")]
    listen: String,

    /// Path of the snapshot file read at startup and overwritten after
    /// every accepted record.
    #[arg(long, default_value = "key_mouse_events.json")]
    snapshot: PathBuf,

    /// Ring capacity: number of records retained before the oldest is
    /// overwritten. The default is one slot per two-minute-equivalent
    /// granularity over a day (24*60*2).
    #[arg(long, default_value = "2880")]
    capacity: usize,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("server failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<RingStore<ActivityRecord>> = Arc::new(RingStore::new(cli.capacity)?);

    // A missing snapshot is the normal first run; anything else still
    // leaves the server up with an empty window.
    match store.load(&cli.snapshot) {
        Ok(()) => tracing::info!(
            count = store.len(),
            "restored snapshot from {}",
            cli.snapshot.display()
        ),
        Err(e) if e.is_not_found() => tracing::info!(
            "no snapshot at {}, starting with an empty window",
            cli.snapshot.display()
        ),
        Err(e) => tracing::warn!("snapshot not restored, starting empty: {e}"),
    }

    let listener = TcpListener::bind(&cli.listen)?;
    tracing::info!("listening on {}", cli.listen);

    api::serve(listener, store, cli.snapshot);
    Ok(())
}
