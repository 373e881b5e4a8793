//! Board state representation and the public game contract
//!
//! A [`Board`] is a value: cloning it yields a fully independent deep copy
//! with identical score, counters, and flags, which is what the lookahead
//! search relies on when it speculatively applies candidate moves.

pub mod cell;
pub mod goal;
pub mod tile;

mod cascade;

use std::{fmt, time::Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub use cell::Cell;
pub use goal::GoalSpec;
pub use tile::{Color, Orientation, Tile};

/// Direction of a swap, relative to the move's origin cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a direction token (`u`/`d`/`l`/`r`, long forms accepted).
    pub fn parse(input: &str) -> Result<Direction> {
        match input.trim().to_lowercase().as_str() {
            "u" | "up" => Ok(Direction::Up),
            "d" | "down" => Ok(Direction::Down),
            "l" | "left" => Ok(Direction::Left),
            "r" | "right" => Ok(Direction::Right),
            _ => Err(Error::ParseDirection {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{name}")
    }
}

/// A player move: the origin cell and the direction of its swap partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Move {
    pub fn new(row: usize, col: usize, direction: Direction) -> Move {
        Move {
            row,
            col,
            direction,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.row, self.col, self.direction)
    }
}

/// The playing field: a rows x cols grid of cells plus the run bookkeeping
/// (score, move counter, jelly counter, goal, finished flag, timer).
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    score: u64,
    move_counter: u32,
    last_move: Option<Move>,
    active_jelly: u32,
    goal: GoalSpec,
    finished: bool,
    started_at: Instant,
}

impl Board {
    /// Create an empty board for the given goal. Call [`Board::start`] to
    /// populate it before play.
    pub fn new(rows: usize, cols: usize, goal: GoalSpec) -> Result<Board> {
        if rows < 3 || cols < 3 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        goal.validate()?;
        if goal.jelly_count() as usize > rows * cols {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "jelly count {} exceeds board capacity {}",
                    goal.jelly_count(),
                    rows * cols
                ),
            });
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![Cell::empty(); rows * cols],
            score: 0,
            move_counter: 0,
            last_move: None,
            active_jelly: 0,
            goal,
            finished: false,
            started_at: Instant::now(),
        })
    }

    /// Build a board from an explicit layout, for tests and tooling.
    ///
    /// Each line is one row; cells are whitespace-separated codes as produced
    /// by [`Cell::code`] (e.g. `R`, `GV`, `C`, `RJ`).
    ///
    /// # Errors
    ///
    /// Returns an error for ragged rows, undersized grids, or unknown codes.
    pub fn from_layout(layout: &str, goal: GoalSpec) -> Result<Board> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.split_whitespace().count());
        if rows < 3 || cols < 3 {
            return Err(Error::InvalidDimensions { rows, cols });
        }

        let mut cells = Vec::with_capacity(rows * cols);
        let mut active_jelly = 0;
        for (row, line) in lines.iter().enumerate() {
            let codes: Vec<&str> = line.split_whitespace().collect();
            if codes.len() != cols {
                return Err(Error::InvalidConfiguration {
                    message: format!(
                        "row {row} has {} cells, expected {cols}",
                        codes.len()
                    ),
                });
            }
            for (col, code) in codes.iter().enumerate() {
                let cell = Cell::from_code(code).ok_or_else(|| Error::InvalidCellCode {
                    code: (*code).to_string(),
                    row,
                    col,
                })?;
                if cell.jelly {
                    active_jelly += 1;
                }
                cells.push(cell);
            }
        }

        goal.validate()?;
        Ok(Board {
            rows,
            cols,
            cells,
            score: 0,
            move_counter: 0,
            last_move: None,
            active_jelly,
            goal,
            finished: false,
            started_at: Instant::now(),
        })
    }

    /// Initialize (or reset) the board: fresh random tiles cascaded to a
    /// match-free fixpoint, jelly placed for jelly modes, counters zeroed.
    ///
    /// Cascades triggered while settling the initial grid are score-neutral:
    /// the score is reset after stabilization.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = Cell::new(Tile::random_plain(rng));
        }
        self.active_jelly = 0;
        self.stabilize(rng);

        let jelly = self.goal.jelly_count();
        if jelly > 0 {
            let mut placed = 0;
            while placed < jelly {
                let row = rng.random_range(0..self.rows);
                let col = rng.random_range(0..self.cols);
                let cell = self.cell_mut(row, col);
                if !cell.jelly {
                    cell.set_jelly();
                    placed += 1;
                }
            }
            self.active_jelly = jelly;
        }

        self.score = 0;
        self.move_counter = 0;
        self.last_move = None;
        self.finished = false;
        self.started_at = Instant::now();
    }

    /// Attempt one player move.
    ///
    /// On success the board cascades to a stable state, the move counter
    /// increments exactly once, and the goal is re-evaluated. On failure the
    /// board is left byte-for-byte unchanged.
    ///
    /// # Errors
    ///
    /// `MoveOutOfBounds` if the swap partner falls off the grid;
    /// `MoveWithoutMatch` if the swap is not a special combination and
    /// produces no run anywhere on the board.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, mv: Move, rng: &mut R) -> Result<()> {
        let (to_row, to_col) = self.target_of(mv)?;
        let from_tile = self.tile_at(mv.row, mv.col);
        let to_tile = self.tile_at(to_row, to_col);

        if from_tile.is_wrapped() || to_tile.is_wrapped() {
            self.wrapped_combo((mv.row, mv.col), (to_row, to_col), rng);
        } else if from_tile.is_striped() && to_tile.is_striped() {
            self.striped_combo((mv.row, mv.col), (to_row, to_col), rng);
        } else {
            // Probe the swap on a throwaway clone before touching the board.
            let mut probe = self.clone();
            probe.swap_tiles((mv.row, mv.col), (to_row, to_col));
            if !probe.has_any_run() {
                return Err(Error::MoveWithoutMatch {
                    row: mv.row,
                    col: mv.col,
                    direction: mv.direction,
                });
            }
            self.swap_tiles((mv.row, mv.col), (to_row, to_col));
        }

        self.last_move = Some(mv);
        self.stabilize(rng);
        self.move_counter += 1;
        self.evaluate_goal();
        Ok(())
    }

    /// Randomly permute all tile positions, re-stabilize, and restore the
    /// pre-shuffle score. Shuffling is score-neutral.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let old_score = self.score;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let swap_row = rng.random_range(0..self.rows);
                let swap_col = rng.random_range(0..self.cols);
                self.swap_tiles((row, col), (swap_row, swap_col));
            }
        }
        self.stabilize(rng);
        self.score = old_score;
    }

    /// Structural encoding of the grid: each cell's printable code in
    /// row-major order. Lossy with respect to exploding wrapped markers.
    pub fn fingerprint(&self) -> String {
        self.cells.iter().map(Cell::code).collect()
    }

    /// Textual grid dump for debugging.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let code = self.cell(row, col).code();
                out.push_str(&format!("{code:>3} "));
            }
            out.pop();
            out.push('\n');
        }
        out
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn move_count(&self) -> u32 {
        self.move_counter
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn active_jelly(&self) -> u32 {
        self.active_jelly
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn goal(&self) -> GoalSpec {
        self.goal
    }

    /// Wall-clock time since the last [`Board::start`].
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Tile at a cell, if any. The grid is full between moves; empty cells
    /// exist only transiently inside a cascade.
    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        self.cell(row, col).tile
    }

    pub fn is_jellied(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).jelly
    }

    // --- internals shared with the cascade engine ---

    pub(crate) fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * self.cols + col]
    }

    fn tile_at(&self, row: usize, col: usize) -> Tile {
        self.tile(row, col)
            .expect("grid must be full at a move boundary")
    }

    pub(crate) fn swap_tiles(&mut self, a: (usize, usize), b: (usize, usize)) {
        if a == b {
            return;
        }
        let tile_a = self.cell_mut(a.0, a.1).tile.take();
        let tile_b = self.cell_mut(b.0, b.1).tile.take();
        self.cell_mut(a.0, a.1).tile = tile_b;
        self.cell_mut(b.0, b.1).tile = tile_a;
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    pub(crate) fn clear_jelly_at(&mut self, row: usize, col: usize) {
        let cell = self.cell_mut(row, col);
        if cell.jelly {
            cell.jelly = false;
            self.active_jelly -= 1;
        }
    }

    fn target_of(&self, mv: Move) -> Result<(usize, usize)> {
        let out_of_bounds = || Error::MoveOutOfBounds {
            row: mv.row,
            col: mv.col,
            direction: mv.direction,
        };
        if mv.row >= self.rows || mv.col >= self.cols {
            return Err(out_of_bounds());
        }
        match mv.direction {
            Direction::Up if mv.row > 0 => Ok((mv.row - 1, mv.col)),
            Direction::Down if mv.row < self.rows - 1 => Ok((mv.row + 1, mv.col)),
            Direction::Left if mv.col > 0 => Ok((mv.row, mv.col - 1)),
            Direction::Right if mv.col < self.cols - 1 => Ok((mv.row, mv.col + 1)),
            _ => Err(out_of_bounds()),
        }
    }

    fn evaluate_goal(&mut self) {
        match self.goal {
            GoalSpec::ScoreTarget {
                target,
                move_budget,
            } => {
                assert!(
                    self.move_counter <= move_budget,
                    "move accepted past an exhausted move budget"
                );
                if self.score >= target || self.move_counter >= move_budget {
                    self.finished = true;
                }
            }
            GoalSpec::Timed { limit } => {
                if self.started_at.elapsed() >= limit {
                    self.finished = true;
                }
            }
            GoalSpec::JellyClear { .. } => {
                if self.active_jelly == 0 {
                    self.finished = true;
                }
            }
            GoalSpec::Combined {
                target,
                move_budget,
                ..
            } => {
                assert!(
                    self.move_counter <= move_budget,
                    "move accepted past an exhausted move budget"
                );
                if (self.score >= target && self.active_jelly == 0)
                    || self.move_counter >= move_budget
                {
                    self.finished = true;
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn score_goal(target: u64, move_budget: u32) -> GoalSpec {
        GoalSpec::ScoreTarget {
            target,
            move_budget,
        }
    }

    #[test]
    fn rejects_undersized_grids() {
        assert!(Board::new(2, 5, score_goal(10, 10)).is_err());
        assert!(Board::new(5, 2, score_goal(10, 10)).is_err());
        assert!(Board::new(3, 3, score_goal(10, 10)).is_ok());
    }

    #[test]
    fn rejects_excess_jelly() {
        let goal = GoalSpec::JellyClear { jelly: 10 };
        assert!(Board::new(3, 3, goal).is_err());
    }

    #[test]
    fn start_produces_match_free_full_grid() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::new(6, 6, score_goal(1_000, 50)).unwrap();
        board.start(&mut rng);
        assert!(!board.has_any_run());
        assert_eq!(board.score(), 0);
        assert_eq!(board.move_count(), 0);
        for row in 0..6 {
            for col in 0..6 {
                assert!(board.tile(row, col).is_some());
            }
        }
    }

    #[test]
    fn start_places_requested_jelly() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new(5, 5, GoalSpec::JellyClear { jelly: 4 }).unwrap();
        board.start(&mut rng);
        assert_eq!(board.active_jelly(), 4);
        let jellied = (0..5)
            .flat_map(|row| (0..5).map(move |col| (row, col)))
            .filter(|&(row, col)| board.is_jellied(row, col))
            .count();
        assert_eq!(jellied, 4);
    }

    #[test]
    fn clone_is_independent() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut board = Board::new(5, 5, score_goal(1_000, 50)).unwrap();
        board.start(&mut rng);
        let snapshot = board.clone();
        let fingerprint = board.fingerprint();

        // Mutate the clone; the original must not change.
        let mut clone = snapshot.clone();
        clone.shuffle(&mut rng);
        assert_eq!(board.fingerprint(), fingerprint);
    }

    #[test]
    fn out_of_bounds_moves_are_rejected_unchanged() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut board = Board::new(4, 4, score_goal(1_000, 50)).unwrap();
        board.start(&mut rng);
        let before = board.fingerprint();

        for mv in [
            Move::new(0, 0, Direction::Up),
            Move::new(0, 0, Direction::Left),
            Move::new(3, 3, Direction::Down),
            Move::new(3, 3, Direction::Right),
            Move::new(7, 0, Direction::Down),
        ] {
            let err = board.apply_move(mv, &mut rng).unwrap_err();
            assert!(err.is_invalid_move());
        }
        assert_eq!(board.fingerprint(), before);
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn shuffle_is_score_neutral() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut board = Board::new(6, 6, score_goal(10_000, 100)).unwrap();
        board.start(&mut rng);
        board.shuffle(&mut rng);
        assert_eq!(board.score(), 0);
        assert!(!board.has_any_run());
    }

    #[test]
    fn direction_parsing() {
        assert_eq!(Direction::parse("u").unwrap(), Direction::Up);
        assert_eq!(Direction::parse("RIGHT").unwrap(), Direction::Right);
        assert!(Direction::parse("q").is_err());
    }

    #[test]
    fn from_layout_counts_jelly_and_rejects_bad_codes() {
        let board = Board::from_layout(
            "R G B\nRJ G B\nB R GJ",
            GoalSpec::JellyClear { jelly: 2 },
        )
        .unwrap();
        assert_eq!(board.active_jelly(), 2);
        assert_eq!(board.tile(0, 0), Some(Tile::Plain { color: Color::Red }));

        let err = Board::from_layout("R G Z\nR G B\nR G B", score_goal(10, 10)).unwrap_err();
        assert!(matches!(err, Error::InvalidCellCode { .. }));
    }

    #[test]
    fn fingerprint_reflects_cell_triples() {
        let goal = score_goal(10, 10);
        let a = Board::from_layout("R G B\nG B R\nB R G", goal).unwrap();
        let b = Board::from_layout("R G B\nG B R\nB R G", goal).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let jellied = Board::from_layout("RJ G B\nG B R\nB R G", goal).unwrap();
        assert_ne!(a.fingerprint(), jellied.fingerprint());
    }
}
