//! CLI for the ostinato activity ring store.
//!
//! Provides commands for inspecting, dumping, and benchmarking snapshot
//! files written by the ingestion service.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use ostinato::{ActivityRecord, Ring, RingStore, snapshot};

/// ostinato — activity ring store CLI.
#[derive(Parser)]
#[command(name = "ostinato", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Display snapshot geometry and window boundaries.
    Info {
        /// Path to the snapshot file.
        snapshot: PathBuf,
    },

    /// Print the live window, oldest first.
    Dump {
        /// Path to the snapshot file.
        snapshot: PathBuf,

        /// Output format.
        #[arg(long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Run an append/read/save microbenchmark.
    Bench {
        /// Number of records to append.
        #[arg(long, default_value = "1000000")]
        records: u64,

        /// Ring capacity to benchmark against.
        #[arg(long, default_value = "2880")]
        capacity: usize,
    },
}

/// Output format for dumped windows.
#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Comma-separated values.
    Csv,
    /// JSON array of records.
    Json,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { snapshot } => cmd_info(&snapshot),
        Commands::Dump { snapshot, format } => cmd_dump(&snapshot, &format),
        Commands::Bench { records, capacity } => cmd_bench(records, capacity),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Implements `ostinato info <snapshot>`.
fn cmd_info(snapshot_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let ring: Ring<ActivityRecord> = snapshot::read_snapshot(snapshot_path)?;
    let file_size = std::fs::metadata(snapshot_path)?.len();

    println!("Snapshot: {}", snapshot_path.display());
    println!();
    println!("  Capacity:    {}", ring.capacity());
    println!("  Live count:  {}", ring.len());
    println!("  Start slot:  {}", ring.start());
    println!(
        "  Full:        {}",
        if ring.is_full() { "yes (appends evict)" } else { "no" }
    );

    if let Some(oldest) = ring.iter().next() {
        println!("  Oldest:      {}", oldest.date);
    }
    if let Some(newest) = ring.iter().last() {
        println!("  Newest:      {}", newest.date);
    }

    println!();
    println!("File size: {} ({file_size} bytes)", format_bytes(file_size));

    Ok(())
}

/// Implements `ostinato dump <snapshot>`.
fn cmd_dump(
    snapshot_path: &PathBuf,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let ring: Ring<ActivityRecord> = snapshot::read_snapshot(snapshot_path)?;
    let window = ring.to_vec();

    match format {
        OutputFormat::Csv => {
            println!("# snapshot={}, records={}", snapshot_path.display(), window.len());
            println!("date,keyboard_events,mouse_events");
            for record in &window {
                println!("{},{},{}", record.date, record.keyboard_events, record.mouse_events);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&window)?);
        }
    }

    Ok(())
}

/// Implements `ostinato bench`.
#[allow(clippy::cast_precision_loss)] // Benchmark stats are fine with f64 precision
fn cmd_bench(records: u64, capacity: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("ostinato append-path benchmark");
    println!("  Records:  {records}");
    println!("  Capacity: {capacity}");
    println!();

    let store: RingStore<ActivityRecord> = RingStore::new(capacity)?;

    let start = Instant::now();
    for i in 0..records {
        store.append(ActivityRecord::new("2024-03-01 12:00:00", i, i / 2));
    }
    let elapsed = start.elapsed();

    let ns_per_append = elapsed.as_nanos() as f64 / records as f64;
    let appends_per_sec = records as f64 / elapsed.as_secs_f64();

    println!("Results:");
    println!("  Elapsed:     {elapsed:.3?}");
    println!("  Avg latency: {ns_per_append:.1} ns/append");
    println!("  Throughput:  {appends_per_sec:.0} appends/sec");

    let read_start = Instant::now();
    let window = store.get();
    println!("  Read:        {} records in {:.3?}", window.len(), read_start.elapsed());

    let snapshot_path = std::env::temp_dir().join("ostinato_bench.json");
    let save_start = Instant::now();
    store.save(&snapshot_path)?;
    let save_elapsed = save_start.elapsed();
    let file_size = std::fs::metadata(&snapshot_path)?.len();
    println!(
        "  Save:        {} to disk in {save_elapsed:.3?}",
        format_bytes(file_size)
    );

    // Clean up
    let _ = std::fs::remove_file(&snapshot_path);

    Ok(())
}

/// Formats a byte count as a human-readable string.
#[allow(clippy::cast_precision_loss)] // Byte counts are display-only
fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
