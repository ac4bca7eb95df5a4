// Command line front end: time/power CSV trace -> Power Twin JSON

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use power_twin::{build_power_twin, parse_metadata, PowerTrace};
use tracing::{debug, info, Level};

#[derive(Parser, Debug)]
#[command(name = "power-twin-cli")]
#[command(version)]
#[command(about = "TC-S Power Twin builder: convert a time/power CSV trace into Solar cost.", long_about = None)]
struct Cli {
    /// Path to CSV file with columns: time_s,power_w (gzip/zstd accepted)
    csv_path: PathBuf,

    /// Logical chip identifier (e.g., open-eda-cpu-v1)
    #[arg(long, default_value = "unknown-chip")]
    chip_id: String,

    /// Workload identifier (e.g., resnet50-inference-01)
    #[arg(long, default_value = "unknown-workload")]
    workload_id: String,

    /// Output JSON file path. If omitted, prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Metadata key=value pairs (e.g., --meta process_node_nm=5 voltage_v=0.85)
    #[arg(long, num_args = 0..)]
    meta: Vec<String>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let trace = PowerTrace::open(&cli.csv_path)
        .with_context(|| format!("failed to load trace {}", cli.csv_path.display()))?;
    debug!("Loaded {} samples from {}", trace.len(), trace.trace_file());

    let metadata = parse_metadata(&cli.meta);
    let twin = build_power_twin(&cli.chip_id, &cli.workload_id, &trace, metadata)?;
    let twin_json = serde_json::to_string_pretty(&twin)?;

    match &cli.out {
        Some(out) => {
            fs::write(out, &twin_json)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!("{} kWh -> {} Solar", twin.energy.total_kwh, twin.solar_cost.solar);
            println!("Power Twin written to {}", out.display());
        }
        None => println!("{}", twin_json),
    }

    Ok(())
}
