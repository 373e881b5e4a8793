//! Tilecrush CLI - match-3 simulator and search agent benchmark
//!
//! This CLI provides:
//! - Benchmarking the lookahead agent (or the random baseline) over
//!   reproducible batches of games
//! - Playing single games interactively or watching a policy play

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "crush")]
#[command(version, about = "Tile-matching simulator and search agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Benchmark a policy over a batch of games
    Bench(tilecrush::cli::commands::bench::BenchArgs),

    /// Play a single game (interactive or watched)
    Play(tilecrush::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench(args) => tilecrush::cli::commands::bench::execute(args),
        Commands::Play(args) => tilecrush::cli::commands::play::execute(args),
    }
}
