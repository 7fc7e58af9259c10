//! Branch predictor trace simulator CLI.
//!
//! This binary replays a branch trace through one predictor and reports how it did. It performs:
//! 1. **Configuration:** A classic predictor spec (`--bp gshare:13`) or a JSON file (`--config`).
//! 2. **Replay:** Reads `<pc> <outcome>` records from a file or stdin, predicting and training per branch.
//! 3. **Reporting:** Prints the statistics sections, or a JSON summary with `--json`.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bpsim_core::stats::STATS_SECTIONS;
use bpsim_core::{BranchPredictor, Config, Simulator, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "bpsim",
    author,
    version,
    about = "Trace-driven branch direction predictor simulator",
    long_about = "Replay a branch trace through a Static, Gshare, Tournament or Perceptron predictor.\n\nEach trace line is `<hex pc> <outcome>` where the outcome is 1/0 or T/N.\n\nExamples:\n  bpsim --bp gshare:13 trace.txt\n  bpsim --bp tournament:9:10:10 --sections summary trace.txt\n  zcat trace.gz | bpsim --bp perceptron:32:10 --json"
)]
struct Cli {
    /// Predictor spec: static, gshare:<g>, tournament:<g>:<l>:<p>, perceptron:<g>:<p>[:<w>], custom.
    #[arg(long, default_value = "static", conflicts_with = "config")]
    bp: String,

    /// JSON configuration file (instead of --bp).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trace file; reads stdin when omitted or `-`.
    trace: Option<PathBuf>,

    /// Print a JSON summary instead of the text report.
    #[arg(long)]
    json: bool,

    /// Comma-separated report sections (summary, branch). Default: all.
    #[arg(long, value_delimiter = ',')]
    sections: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs the fmt subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Builds the simulator, replays the trace and reports.
fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Some(unknown) = cli
        .sections
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        return Err(format!(
            "unknown stats section `{unknown}` (expected one of: {})",
            STATS_SECTIONS.join(", ")
        )
        .into());
    }

    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::from_predictor_spec(&cli.bp)?,
    };
    debug!(?config, "resolved configuration");

    let mut sim = Simulator::new(&config)?;
    match cli.trace.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let _ = sim.run(TraceReader::open(path)?)?;
        }
        _ => {
            let _ = sim.run(TraceReader::new(io::stdin().lock()))?;
        }
    }

    let stats = &sim.stats;
    if cli.json {
        let report = json!({
            "scheme": sim.engine.name(),
            "config": config,
            "stats": stats,
            "misprediction_rate": stats.misprediction_rate(),
            "accuracy": stats.accuracy(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Predictor: {}", sim.engine.name());
        stats.print_sections(&cli.sections)?;
    }
    Ok(())
}
