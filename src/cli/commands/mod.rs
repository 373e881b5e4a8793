//! CLI command implementations

pub mod bench;
pub mod play;

use clap::Args;

use crate::{Error, Result, board::GoalSpec};

/// Goal selection flags shared by every command that builds a board.
#[derive(Args, Debug, Clone)]
pub struct GoalArgs {
    /// Goal mode (score, timed, jelly, combined)
    #[arg(long, default_value = "score")]
    pub mode: String,

    /// Score target for score/combined modes
    #[arg(long, default_value_t = 5000)]
    pub target: u64,

    /// Move budget for score/combined modes
    #[arg(long, default_value_t = 20)]
    pub moves: u32,

    /// Time limit in seconds for timed mode
    #[arg(long, default_value_t = 30)]
    pub seconds: u64,

    /// Number of jellied cells for jelly/combined modes
    #[arg(long, default_value_t = 5)]
    pub jelly: u32,
}

impl GoalArgs {
    pub fn to_goal(&self) -> Result<GoalSpec> {
        let goal = match self.mode.to_lowercase().as_str() {
            "score" => GoalSpec::ScoreTarget {
                target: self.target,
                move_budget: self.moves,
            },
            "timed" | "time" => GoalSpec::Timed {
                limit: std::time::Duration::from_secs(self.seconds),
            },
            "jelly" => GoalSpec::JellyClear { jelly: self.jelly },
            "combined" => GoalSpec::Combined {
                target: self.target,
                move_budget: self.moves,
                jelly: self.jelly,
            },
            other => {
                return Err(Error::ParseGoalMode {
                    input: other.to_string(),
                    expected: "score, timed, jelly, combined".to_string(),
                });
            }
        };
        goal.validate()?;
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(mode: &str) -> GoalArgs {
        GoalArgs {
            mode: mode.to_string(),
            target: 100,
            moves: 10,
            seconds: 5,
            jelly: 3,
        }
    }

    #[test]
    fn parses_every_mode() {
        assert!(matches!(
            args("score").to_goal().unwrap(),
            GoalSpec::ScoreTarget {
                target: 100,
                move_budget: 10
            }
        ));
        assert!(matches!(args("timed").to_goal().unwrap(), GoalSpec::Timed { .. }));
        assert!(matches!(
            args("jelly").to_goal().unwrap(),
            GoalSpec::JellyClear { jelly: 3 }
        ));
        assert!(matches!(
            args("COMBINED").to_goal().unwrap(),
            GoalSpec::Combined { .. }
        ));
    }

    #[test]
    fn rejects_unknown_modes_and_bad_thresholds() {
        assert!(matches!(
            args("endless").to_goal(),
            Err(Error::ParseGoalMode { .. })
        ));
        let mut zero_moves = args("score");
        zero_moves.moves = 0;
        assert!(zero_moves.to_goal().is_err());
    }
}
