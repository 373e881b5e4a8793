//! Heuristic lookahead search
//!
//! The agent plays by expanding a beam-limited tree of speculative board
//! states, scoring them with a positional heuristic, and backpropagating the
//! scores to pick a move. See [`SearchAgent`] for the full procedure.

mod agent;
mod cache;
mod tree;

pub mod heuristic;

pub use agent::SearchAgent;
pub use cache::{ScoredChild, StateCache};
pub use tree::{SearchNode, SearchTree};
