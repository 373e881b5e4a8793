//! Move policy port - abstraction over the different ways a move gets picked
//!
//! A policy is the boundary between the game loop and whatever picks the
//! moves: the lookahead agent, the uniform-random baseline, or a person at a
//! terminal. The runner drives any of them through this one interface.

mod human;
mod random;

pub use human::HumanPolicy;
pub use random::RandomPolicy;

use rand::RngCore;

use crate::{Result, board::Board};

/// Maximum consecutive board shuffles a policy may request while hunting for
/// a legal move before giving up on the position.
pub const MAX_SHUFFLE_RETRIES: usize = 8;

/// A move-selection strategy.
///
/// `play_move` both selects and applies one move: policies that need to
/// reshuffle a dead board (no legal swap anywhere) do so internally, so a
/// successful return always means the move counter advanced by exactly one.
pub trait MovePolicy {
    /// Select and apply the next move on `board`.
    ///
    /// # Errors
    ///
    /// Returns `ShuffleExhausted` when no legal move could be found within
    /// [`MAX_SHUFFLE_RETRIES`] reshuffles, or an I/O error for interactive
    /// policies.
    fn play_move(&mut self, board: &mut Board, rng: &mut dyn RngCore) -> Result<()>;

    /// Policy name, used in logs and exported records.
    fn name(&self) -> &'static str;

    /// Clear per-game state before a fresh game. Stateless policies keep the
    /// default no-op.
    fn reset(&mut self) {}

    /// Number of candidate states this policy has generated so far. Zero for
    /// policies that do no lookahead.
    fn children_generated(&self) -> u64 {
        0
    }
}
