//! Batch game runner and aggregate statistics

pub mod export;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

use crate::{
    Result,
    board::{Board, GoalSpec},
    policy::MovePolicy,
};

/// Parameters for a batch of games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub runs: usize,
    pub rows: usize,
    pub cols: usize,
    pub goal: GoalSpec,
    /// Base seed; game `i` plays with `seed + i + 1`.
    pub seed: u64,
}

/// Outcome of one full game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub run: usize,
    pub seed: u64,
    pub score: u64,
    pub moves: u32,
    pub elapsed_secs: f64,
    pub children_generated: u64,
}

/// Aggregate statistics over a batch of games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub policy: String,
    pub runs: usize,
    pub rows: usize,
    pub cols: usize,
    pub mean_score: f64,
    pub std_dev_score: f64,
    pub median_score: f64,
    pub mean_moves: f64,
    pub mean_elapsed_secs: f64,
    pub total_children_generated: u64,
    pub records: Vec<GameRecord>,
}

/// Plays batches of games with a policy and collects per-game records.
///
/// Each game gets its own seeded generator, so any single game can be
/// replayed in isolation from its recorded seed.
#[derive(Debug, Clone)]
pub struct GameRunner {
    config: RunConfig,
}

impl GameRunner {
    /// # Errors
    ///
    /// Rejects configurations whose board cannot be constructed and batches
    /// of zero runs.
    pub fn new(config: RunConfig) -> Result<GameRunner> {
        if config.runs == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: "run count must be at least 1".to_string(),
            });
        }
        // Fail configuration errors here rather than mid-batch.
        Board::new(config.rows, config.cols, config.goal)?;
        Ok(GameRunner { config })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Play the whole batch, invoking `on_game` after each finished game.
    ///
    /// # Errors
    ///
    /// Stops at the first game that fails (shuffle exhaustion or I/O from an
    /// interactive policy).
    pub fn run(
        &self,
        policy: &mut dyn MovePolicy,
        mut on_game: impl FnMut(&GameRecord),
    ) -> Result<RunSummary> {
        let mut records = Vec::with_capacity(self.config.runs);
        for run in 0..self.config.runs {
            let record = self.play_one(policy, run)?;
            on_game(&record);
            records.push(record);
        }
        Ok(RunSummary::from_records(
            policy.name(),
            &self.config,
            records,
        ))
    }

    fn play_one(&self, policy: &mut dyn MovePolicy, run: usize) -> Result<GameRecord> {
        let seed = self.config.seed + run as u64 + 1;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new(self.config.rows, self.config.cols, self.config.goal)?;
        board.start(&mut rng);
        policy.reset();

        while !board.is_finished() {
            policy.play_move(&mut board, &mut rng)?;
        }

        Ok(GameRecord {
            run,
            seed,
            score: board.score(),
            moves: board.move_count(),
            elapsed_secs: board.elapsed().as_secs_f64(),
            children_generated: policy.children_generated(),
        })
    }
}

impl RunSummary {
    fn from_records(policy: &str, config: &RunConfig, records: Vec<GameRecord>) -> RunSummary {
        let scores: Vec<f64> = records.iter().map(|r| r.score as f64).collect();
        let mean_score = scores.iter().mean();
        let std_dev_score = scores.iter().population_std_dev();
        let median_score = Data::new(scores).median();
        let mean_moves = records.iter().map(|r| f64::from(r.moves)).mean();
        let mean_elapsed_secs = records.iter().map(|r| r.elapsed_secs).mean();
        let total_children_generated = records.iter().map(|r| r.children_generated).sum();

        RunSummary {
            policy: policy.to_string(),
            runs: records.len(),
            rows: config.rows,
            cols: config.cols,
            mean_score,
            std_dev_score,
            median_score,
            mean_moves,
            mean_elapsed_secs,
            total_children_generated,
            records,
        }
    }

    /// Lookahead children generated per move, averaged over the batch.
    pub fn mean_children_per_move(&self) -> f64 {
        let moves: u64 = self.records.iter().map(|r| u64::from(r.moves)).sum();
        if moves == 0 {
            return 0.0;
        }
        self.total_children_generated as f64 / moves as f64
    }
}
