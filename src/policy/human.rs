//! Interactive policy reading moves from a terminal

use std::io::{BufRead, Write};

use rand::RngCore;

use crate::{
    Error, Result,
    board::{Board, Direction, Move},
    policy::MovePolicy,
};

/// Prompts for moves in `row,col,dir` form (`dir` one of `u`/`d`/`l`/`r`),
/// or the word `shuffle`. Rejected moves are reported and re-prompted.
pub struct HumanPolicy<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> HumanPolicy<I, O> {
    pub fn new(input: I, output: O) -> HumanPolicy<I, O> {
        HumanPolicy { input, output }
    }

    fn read_line(&mut self) -> Result<String> {
        let io_error = |source| Error::Io {
            operation: "read move input".to_string(),
            source,
        };
        write!(self.output, "move (row,col,dir or 'shuffle'): ").map_err(io_error)?;
        self.output.flush().map_err(io_error)?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(io_error(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(line)
    }
}

/// Parse a `row,col,dir` move line.
fn parse_move(line: &str) -> Result<Move> {
    let bad_input = || Error::ParseMoveInput {
        input: line.trim().to_string(),
    };
    let mut parts = line.trim().split(',');
    let row = parts.next().ok_or_else(bad_input)?;
    let col = parts.next().ok_or_else(bad_input)?;
    let direction = parts.next().ok_or_else(bad_input)?;
    if parts.next().is_some() {
        return Err(bad_input());
    }
    let row = row.trim().parse().map_err(|_| bad_input())?;
    let col = col.trim().parse().map_err(|_| bad_input())?;
    let direction = Direction::parse(direction).map_err(|_| bad_input())?;
    Ok(Move::new(row, col, direction))
}

impl<I: BufRead, O: Write> MovePolicy for HumanPolicy<I, O> {
    fn play_move(&mut self, board: &mut Board, rng: &mut dyn RngCore) -> Result<()> {
        let io_error = |source| Error::Io {
            operation: "write board".to_string(),
            source,
        };
        loop {
            writeln!(self.output, "{board}").map_err(io_error)?;
            writeln!(
                self.output,
                "score {} | moves {} | jelly {}",
                board.score(),
                board.move_count(),
                board.active_jelly()
            )
            .map_err(io_error)?;

            let line = self.read_line()?;
            if line.trim().eq_ignore_ascii_case("shuffle") {
                board.shuffle(rng);
                continue;
            }
            let mv = match parse_move(&line) {
                Ok(mv) => mv,
                Err(err) => {
                    writeln!(self.output, "{err}").map_err(io_error)?;
                    continue;
                }
            };
            match board.apply_move(mv, rng) {
                Ok(()) => return Ok(()),
                Err(err) if err.is_invalid_move() => {
                    writeln!(self.output, "{err}").map_err(io_error)?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn name(&self) -> &'static str {
        "human"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GoalSpec;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn parses_well_formed_moves() {
        let mv = parse_move("2,3,r\n").unwrap();
        assert_eq!(mv, Move::new(2, 3, Direction::Right));
        let mv = parse_move(" 0 , 1 , down ").unwrap();
        assert_eq!(mv, Move::new(0, 1, Direction::Down));
    }

    #[test]
    fn rejects_malformed_moves() {
        for input in ["", "1,2", "1,2,3,4", "a,b,r", "1,2,q"] {
            assert!(matches!(
                parse_move(input),
                Err(Error::ParseMoveInput { .. })
            ));
        }
    }

    #[test]
    fn retries_until_a_legal_move_is_entered() {
        // A no-match swap first, then a legal one completing the bottom run.
        let mut board = Board::from_layout(
            "B G B\n\
             R O Y\n\
             G R R",
            GoalSpec::ScoreTarget {
                target: 1_000_000,
                move_budget: 10,
            },
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(31);
        let input = b"0,0,r\n1,0,d\n" as &[u8];
        let mut output = Vec::new();
        let mut policy = HumanPolicy::new(input, &mut output);
        policy.play_move(&mut board, &mut rng).unwrap();
        assert_eq!(board.move_count(), 1);
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("no 3-match"));
    }

    #[test]
    fn closed_input_is_an_io_error() {
        let mut board = Board::from_layout(
            "B G B\n\
             R O Y\n\
             G R R",
            GoalSpec::ScoreTarget {
                target: 1_000_000,
                move_budget: 10,
            },
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(37);
        let input = b"" as &[u8];
        let mut output = Vec::new();
        let mut policy = HumanPolicy::new(input, &mut output);
        assert!(matches!(
            policy.play_move(&mut board, &mut rng),
            Err(Error::Io { .. })
        ));
    }
}
