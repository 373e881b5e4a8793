//! Tile-matching cascade simulator with a heuristic lookahead agent
//!
//! This crate provides:
//! - A complete match-3 board engine: runs, special tiles, combinations,
//!   gravity refill, jelly objectives, and four goal modes
//! - A beam-limited lookahead agent driven by a positional heuristic
//! - Random and interactive baseline policies behind one policy port
//! - A batch runner with aggregate statistics and JSON/CSV export

pub mod board;
pub mod cli;
pub mod error;
pub mod policy;
pub mod runner;
pub mod search;

pub use board::{Board, Cell, Color, Direction, GoalSpec, Move, Orientation, Tile};
pub use error::{Error, Result};
pub use policy::{HumanPolicy, MovePolicy, RandomPolicy};
pub use runner::{GameRecord, GameRunner, RunConfig, RunSummary};
pub use search::SearchAgent;
