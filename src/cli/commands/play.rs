//! Play command - a single game, interactive or watched

use anyhow::Result;
use clap::Parser;
use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::{
    Error,
    board::Board,
    cli::{commands::GoalArgs, output},
    policy::{HumanPolicy, MovePolicy, RandomPolicy},
    search::SearchAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Play a single game")]
pub struct PlayArgs {
    /// Who plays (human, search, random)
    #[arg(long, short = 'p', default_value = "human")]
    pub policy: String,

    /// Board rows
    #[arg(long, default_value_t = 9)]
    pub rows: usize,

    /// Board columns
    #[arg(long, default_value_t = 9)]
    pub cols: usize,

    /// Lookahead depth for the search policy
    #[arg(long, default_value_t = 3)]
    pub depth: u32,

    /// Beam width for the search policy
    #[arg(long, default_value_t = 9)]
    pub beam: usize,

    /// Random seed; omit for a fresh game every time
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub goal: GoalArgs,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let goal = args.goal.to_goal()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut board = Board::new(args.rows, args.cols, goal)?;
    board.start(&mut rng);

    match args.policy.to_lowercase().as_str() {
        "human" => {
            let stdin = std::io::stdin();
            let mut policy = HumanPolicy::new(stdin.lock(), std::io::stdout());
            play_out(&mut board, &mut policy, &mut rng, false)?;
        }
        "search" | "ai" => {
            let mut policy = SearchAgent::new(args.depth, args.beam)?;
            play_out(&mut board, &mut policy, &mut rng, true)?;
        }
        "random" => {
            let mut policy = RandomPolicy::new();
            play_out(&mut board, &mut policy, &mut rng, true)?;
        }
        other => {
            return Err(Error::ParsePolicy {
                input: other.to_string(),
                expected: "human, search, random".to_string(),
            }
            .into());
        }
    }

    output::print_section("Game Over");
    output::print_kv("Score", &board.score().to_string());
    output::print_kv("Moves", &board.move_count().to_string());
    output::print_kv("Time", &format!("{:.2}s", board.elapsed().as_secs_f64()));
    if board.goal().jelly_count() > 0 {
        output::print_kv("Jelly left", &board.active_jelly().to_string());
    }
    Ok(())
}

/// Drive the game to its goal. Interactive policies narrate themselves;
/// for the others each move is echoed here.
fn play_out(
    board: &mut Board,
    policy: &mut dyn MovePolicy,
    rng: &mut dyn RngCore,
    narrate: bool,
) -> Result<()> {
    while !board.is_finished() {
        policy.play_move(board, rng)?;
        if narrate && let Some(mv) = board.last_move() {
            println!(
                "move {:3}: {} -> score {}",
                board.move_count(),
                mv,
                board.score()
            );
            println!("{board}");
        }
    }
    Ok(())
}
