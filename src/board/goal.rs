//! Per-mode goal specifications

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// What it takes to finish a game, checked once after every accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalSpec {
    /// Finish when the score target is reached or the move budget is spent.
    ScoreTarget { target: u64, move_budget: u32 },
    /// Finish when the wall-clock budget has elapsed.
    Timed { limit: Duration },
    /// Finish when every jellied cell has been cleared.
    JellyClear { jelly: u32 },
    /// Finish when the score target is reached with all jelly cleared, or
    /// when the move budget is spent.
    Combined {
        target: u64,
        move_budget: u32,
        jelly: u32,
    },
}

impl GoalSpec {
    /// Move budget, where the mode has one. Drives both the goal check and
    /// the search agent's expansion cutoff.
    pub fn move_budget(&self) -> Option<u32> {
        match *self {
            GoalSpec::ScoreTarget { move_budget, .. } | GoalSpec::Combined { move_budget, .. } => {
                Some(move_budget)
            }
            GoalSpec::Timed { .. } | GoalSpec::JellyClear { .. } => None,
        }
    }

    /// Number of jellied cells to place at game start.
    pub fn jelly_count(&self) -> u32 {
        match *self {
            GoalSpec::JellyClear { jelly } | GoalSpec::Combined { jelly, .. } => jelly,
            _ => 0,
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            GoalSpec::ScoreTarget { .. } => "score",
            GoalSpec::Timed { .. } => "timed",
            GoalSpec::JellyClear { .. } => "jelly",
            GoalSpec::Combined { .. } => "combined",
        }
    }

    /// Validate mode-relevant thresholds at construction time.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Error::InvalidConfiguration { message };
        match *self {
            GoalSpec::ScoreTarget { move_budget, .. } | GoalSpec::Combined { move_budget, .. }
                if move_budget == 0 =>
            {
                Err(invalid("move budget must be at least 1".to_string()))
            }
            GoalSpec::Timed { limit } if limit.is_zero() => {
                Err(invalid("time budget must be non-zero".to_string()))
            }
            GoalSpec::JellyClear { jelly } | GoalSpec::Combined { jelly, .. } if jelly == 0 => {
                Err(invalid("jelly count must be at least 1".to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_budget_only_in_budgeted_modes() {
        let score = GoalSpec::ScoreTarget {
            target: 100,
            move_budget: 20,
        };
        assert_eq!(score.move_budget(), Some(20));
        assert_eq!(
            GoalSpec::Timed {
                limit: Duration::from_secs(30)
            }
            .move_budget(),
            None
        );
        assert_eq!(GoalSpec::JellyClear { jelly: 5 }.move_budget(), None);
    }

    #[test]
    fn zero_thresholds_are_rejected() {
        assert!(
            GoalSpec::ScoreTarget {
                target: 10,
                move_budget: 0
            }
            .validate()
            .is_err()
        );
        assert!(GoalSpec::JellyClear { jelly: 0 }.validate().is_err());
        assert!(
            GoalSpec::Timed {
                limit: Duration::ZERO
            }
            .validate()
            .is_err()
        );
        assert!(
            GoalSpec::Combined {
                target: 10,
                move_budget: 5,
                jelly: 3
            }
            .validate()
            .is_ok()
        );
    }
}
