//! Uniform-random baseline policy

use rand::{Rng, RngCore};

use crate::{
    Error, Result,
    board::{Board, Direction, Move},
    policy::{MAX_SHUFFLE_RETRIES, MovePolicy},
};

/// Picks a legal move uniformly at random.
///
/// Candidates are drawn without replacement from the right/down swaps of
/// every cell (left/up swaps are mirror images of a neighbor's right/down
/// swap, so nothing is lost). When every candidate has been rejected the
/// board is reshuffled and the pool rebuilt.
#[derive(Debug, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> RandomPolicy {
        RandomPolicy
    }
}

impl MovePolicy for RandomPolicy {
    fn play_move(&mut self, board: &mut Board, rng: &mut dyn RngCore) -> Result<()> {
        let mut shuffles = 0;
        let mut pool: Vec<Move> = Vec::new();
        loop {
            if pool.is_empty() {
                if shuffles >= MAX_SHUFFLE_RETRIES {
                    return Err(Error::ShuffleExhausted { attempts: shuffles });
                }
                for row in 0..board.rows() {
                    for col in 0..board.cols() {
                        pool.push(Move::new(row, col, Direction::Right));
                        pool.push(Move::new(row, col, Direction::Down));
                    }
                }
            }
            let index = rng.random_range(0..pool.len());
            let mv = pool.swap_remove(index);
            match board.apply_move(mv, rng) {
                Ok(()) => return Ok(()),
                Err(err) if err.is_invalid_move() => {}
                Err(err) => return Err(err),
            }
            if pool.is_empty() {
                board.shuffle(rng);
                shuffles += 1;
            }
        }
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GoalSpec;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn plays_until_the_budget_runs_out() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut board = Board::new(8, 8, GoalSpec::ScoreTarget {
            target: 1_000_000,
            move_budget: 10,
        })
        .unwrap();
        board.start(&mut rng);

        let mut policy = RandomPolicy::new();
        while !board.is_finished() {
            policy.play_move(&mut board, &mut rng).unwrap();
        }
        assert_eq!(board.move_count(), 10);
        assert!(board.is_finished());
    }

    #[test]
    fn every_accepted_move_advances_the_counter_once() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut board = Board::new(6, 6, GoalSpec::ScoreTarget {
            target: 1_000_000,
            move_budget: 5,
        })
        .unwrap();
        board.start(&mut rng);

        let mut policy = RandomPolicy::new();
        for expected in 1..=5 {
            policy.play_move(&mut board, &mut rng).unwrap();
            assert_eq!(board.move_count(), expected);
        }
    }
}
