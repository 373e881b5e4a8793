//! Bench command - batch games with a policy and report statistics

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    Error,
    cli::{commands::GoalArgs, output},
    policy::{MovePolicy, RandomPolicy},
    runner::{GameRunner, RunConfig, export},
    search::SearchAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Benchmark a policy over a batch of games")]
pub struct BenchArgs {
    /// Policy to benchmark (search, random)
    #[arg(long, short = 'p', default_value = "search")]
    pub policy: String,

    /// Number of games to play
    #[arg(long, short = 'n', default_value_t = 10)]
    pub runs: usize,

    /// Board rows
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    /// Board columns
    #[arg(long, default_value_t = 10)]
    pub cols: usize,

    /// Lookahead depth for the search policy
    #[arg(long, default_value_t = 3)]
    pub depth: u32,

    /// Beam width for the search policy
    #[arg(long, default_value_t = 9)]
    pub beam: usize,

    /// Memoize expansions across games
    #[arg(long)]
    pub cache: bool,

    /// Base random seed; game i plays with seed + i + 1
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    #[command(flatten)]
    pub goal: GoalArgs,

    /// Export the full summary as JSON
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Export per-game records as CSV
    #[arg(long)]
    pub export_csv: Option<PathBuf>,
}

pub fn execute(args: BenchArgs) -> Result<()> {
    let goal = args.goal.to_goal()?;
    let runner = GameRunner::new(RunConfig {
        runs: args.runs,
        rows: args.rows,
        cols: args.cols,
        goal,
        seed: args.seed,
    })?;

    let mut policy: Box<dyn MovePolicy> = match args.policy.to_lowercase().as_str() {
        "search" | "ai" => {
            let agent = SearchAgent::new(args.depth, args.beam)?;
            Box::new(if args.cache { agent.with_cache() } else { agent })
        }
        "random" => Box::new(RandomPolicy::new()),
        other => {
            return Err(Error::ParsePolicy {
                input: other.to_string(),
                expected: "search, random".to_string(),
            }
            .into());
        }
    };

    println!(
        "Benchmarking '{}' on {}x{} ({} runs, goal: {})",
        policy.name(),
        args.rows,
        args.cols,
        args.runs,
        goal.mode_name()
    );

    let pb = output::create_run_progress(args.runs as u64);
    let summary = runner.run(policy.as_mut(), |record| {
        pb.set_message(format!("score {}", record.score));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    output::print_summary(&summary);

    if let Some(path) = &args.export_json {
        export::write_json(path, &summary)?;
        println!("\nSummary written to: {}", path.display());
    }
    if let Some(path) = &args.export_csv {
        export::write_csv(path, &summary)?;
        println!("Records written to: {}", path.display());
    }

    Ok(())
}
