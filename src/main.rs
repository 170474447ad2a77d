//! Trace runner (default binary).
//!
//! Replays a recorded input trace headlessly and prints the final state.
//!
//! Usage:
//!   tetris-sim replay <trace-file> [--seed N] [--json]
//!
//! Timing can be tuned through `TETRIS_DAS_MS`, `TETRIS_ARR_MS`,
//! `TETRIS_LOCK_DELAY_MS` and `TETRIS_SOFT_DROP_MS`. Logging follows
//! `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use tetris_sim::core::GameConfig;
use tetris_sim::replay::{parse_trace, replay, ReplayOutcome};

#[derive(Parser)]
#[command(name = "tetris-sim")]
#[command(about = "Deterministic falling-block simulation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay an input trace and report the outcome
    Replay {
        /// Path to the trace file
        trace: PathBuf,
        /// Override the seed named in the trace
        #[arg(long)]
        seed: Option<u32>,
        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Replay { trace, seed, json } => run_replay(&trace, seed, json),
    }
}

fn run_replay(path: &Path, seed: Option<u32>, json: bool) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read trace {}", path.display()))?;
    let mut trace =
        parse_trace(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    if seed.is_some() {
        trace.seed = seed;
    }

    let config = GameConfig::from_env().context("invalid timing configuration")?;
    debug!(?config, "loaded configuration");

    let outcome = replay(&trace, config);
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_summary(&outcome);
    }
    Ok(())
}

fn print_summary(outcome: &ReplayOutcome) {
    let snap = &outcome.snapshot;
    println!("seed:          {}", outcome.seed);
    println!("status:        {}", snap.status.as_str());
    if let Some(cause) = outcome.game_over {
        println!("game over:     {cause:?}");
    }
    println!("score:         {}", snap.score);
    println!("level:         {}", snap.level);
    println!("lines:         {}", snap.lines);
    println!("pieces locked: {}", outcome.pieces_locked);
    println!("line clears:   {}", outcome.line_clears.len());
    println!("elapsed:       {:.0} ms", outcome.elapsed_ms);
    println!();
    for row in &snap.board {
        let line: String = row
            .iter()
            .map(|cell| cell.map_or('.', |kind| kind.as_str().chars().next().unwrap_or('#')))
            .collect();
        println!("  {line}");
    }
}
