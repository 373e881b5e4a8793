//! Match scan, crush propagation, special combinations, and gravity refill
//!
//! The cascade loop is a fixpoint: scan for a run, crush it (recursively, for
//! special tiles), refill the grid, and rescan until a full pass produces no
//! crush. Every individual crush scores exactly one point; the two endpoint
//! tiles of a wrapped combination score two points flat.

use rand::Rng;

use super::{Board, Color, Orientation, Tile};

/// Axis of a run scan. Doubles as the orientation given to a striped tile
/// produced by a 4-run on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn orientation(self) -> Orientation {
        match self {
            Axis::Horizontal => Orientation::Horizontal,
            Axis::Vertical => Orientation::Vertical,
        }
    }
}

impl Board {
    /// Run the crush/refill loop to convergence.
    pub(crate) fn stabilize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        while self.scan_pass(rng) {}
    }

    /// One scan over the grid, left-to-right and top-to-bottom. On the first
    /// crush, refill and report `true` so the caller restarts the scan.
    fn scan_pass<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let mut crushed = false;
                if col + 2 < self.cols {
                    crushed = self.check_run(row, col, Axis::Horizontal, rng);
                }
                if !crushed && row + 2 < self.rows {
                    crushed = self.check_run(row, col, Axis::Vertical, rng);
                }
                if crushed {
                    self.refill(rng);
                    return true;
                }
            }
        }
        false
    }

    /// Check for a run of >= 3 same-colored tiles starting at (row, col)
    /// along `axis`, crushing it when found.
    ///
    /// Run lengths are capped at 5. A 4-run leaves a striped tile (oriented
    /// along the scan axis) at the anchor cell, a 5-run leaves a wrapped
    /// tile there. Wrapped tiles never run with themselves; an exploding one
    /// is removed here as a single-cell crush.
    fn check_run<R: Rng + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        axis: Axis,
        rng: &mut R,
    ) -> bool {
        let Some(tile) = self.tile(row, col) else {
            return false;
        };
        let Some(color) = tile.color() else {
            if matches!(tile, Tile::Wrapped { exploding: true }) {
                self.crush_at(row, col, rng);
                return true;
            }
            return false;
        };

        let mut length = 0;
        let (mut r, mut c) = (row, col);
        loop {
            if r >= self.rows || c >= self.cols || length > 4 {
                break;
            }
            if self.tile(r, c).and_then(Tile::color) != Some(color) {
                break;
            }
            length += 1;
            match axis {
                Axis::Horizontal => c += 1,
                Axis::Vertical => r += 1,
            }
        }
        if length < 3 {
            return false;
        }

        match axis {
            Axis::Horizontal => self.crush_rect(row, col, row, col + length - 1, rng),
            Axis::Vertical => self.crush_rect(row, col, row + length - 1, col, rng),
        }

        // The anchor is empty once its own crush has run.
        match length {
            4 => self.cell_mut(row, col).place(Tile::Striped {
                color,
                orientation: axis.orientation(),
            }),
            5 => self
                .cell_mut(row, col)
                .place(Tile::Wrapped { exploding: false }),
            _ => {}
        }
        true
    }

    /// Crush every cell in the rectangle, inclusive on both corners.
    pub(crate) fn crush_rect<R: Rng + ?Sized>(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        rng: &mut R,
    ) {
        for row in from_row..=to_row {
            for col in from_col..=to_col {
                self.crush_at(row, col, rng);
            }
        }
    }

    /// Crush a single cell: clear its jelly, remove its tile for one point,
    /// and apply the tile's removal rule.
    ///
    /// A striped tile recursively crushes its whole row or column. A dormant
    /// wrapped tile picks one random color and crushes every tile of that
    /// color board-wide through these same rules; an exploding wrapped tile
    /// is just a one-cell crush.
    pub(crate) fn crush_at<R: Rng + ?Sized>(&mut self, row: usize, col: usize, rng: &mut R) {
        let Some(tile) = self.cell_mut(row, col).take() else {
            return;
        };
        self.clear_jelly_at(row, col);
        self.add_score(1);

        match tile {
            Tile::Plain { .. } | Tile::Wrapped { exploding: true } => {}
            Tile::Striped {
                orientation: Orientation::Vertical,
                ..
            } => {
                self.crush_rect(0, col, self.rows - 1, col, rng);
            }
            Tile::Striped {
                orientation: Orientation::Horizontal,
                ..
            } => {
                self.crush_rect(row, 0, row, self.cols - 1, rng);
            }
            Tile::Wrapped { exploding: false } => {
                let color = Color::random(rng);
                self.crush_color(color, rng);
            }
        }
    }

    /// Crush every tile of one color across the whole board, one by one.
    pub(crate) fn crush_color<R: Rng + ?Sized>(&mut self, color: Color, rng: &mut R) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.tile(row, col).and_then(Tile::color) == Some(color) {
                    self.crush_at(row, col, rng);
                }
            }
        }
    }

    /// Wrapped-tile swap: both endpoints are consumed up front for two
    /// points, then the combination rule for the partner tile fires.
    pub(crate) fn wrapped_combo<R: Rng + ?Sized>(
        &mut self,
        from: (usize, usize),
        to: (usize, usize),
        rng: &mut R,
    ) {
        let first = self
            .cell_mut(from.0, from.1)
            .take()
            .expect("combo endpoint must hold a tile");
        let second = self
            .cell_mut(to.0, to.1)
            .take()
            .expect("combo endpoint must hold a tile");
        self.add_score(2);

        let partner = match (first, second) {
            (Tile::Wrapped { .. }, Tile::Wrapped { .. }) => {
                self.clear_for_wrapped_pair(rng);
                return;
            }
            (Tile::Wrapped { .. }, other) | (other, Tile::Wrapped { .. }) => other,
            _ => unreachable!("wrapped_combo requires a wrapped endpoint"),
        };

        match partner {
            Tile::Striped { color, .. } => {
                // Convert every same-colored tile into a striped tile of
                // random orientation, then crush them one by one. Each crush
                // clears a full row or column, making this the highest-yield
                // combination on the board.
                for row in 0..self.rows {
                    for col in 0..self.cols {
                        if self.tile(row, col).and_then(Tile::color) == Some(color) {
                            self.cell_mut(row, col).take();
                            self.cell_mut(row, col).place(Tile::Striped {
                                color,
                                orientation: Orientation::random(rng),
                            });
                        }
                    }
                }
                self.crush_color(color, rng);
            }
            Tile::Plain { color } => {
                self.crush_color(color, rng);
            }
            Tile::Wrapped { .. } => unreachable!("partner cannot be wrapped here"),
        }
        self.refill(rng);
    }

    /// Wrapped + wrapped: every cell not holding a wrapped tile is cleared
    /// for one point and refilled in place with a fresh random tile; the
    /// surviving wrapped tiles are marked exploding and removed (one point
    /// each) on the immediately following scan pass.
    fn clear_for_wrapped_pair<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                match self.tile(row, col) {
                    Some(Tile::Wrapped { .. }) => {
                        self.cell_mut(row, col).tile = Some(Tile::Wrapped { exploding: true });
                    }
                    Some(_) => {
                        self.cell_mut(row, col).take();
                        self.clear_jelly_at(row, col);
                        self.add_score(1);
                        let fresh = Tile::random_plain(rng);
                        self.cell_mut(row, col).place(fresh);
                    }
                    None => {
                        // The two consumed endpoints; refilled like the rest.
                        self.add_score(1);
                        let fresh = Tile::random_plain(rng);
                        self.cell_mut(row, col).place(fresh);
                    }
                }
            }
        }
    }

    /// Striped + striped swap: the endpoints vanish (no points of their own),
    /// then the full column and the full row through the swap target are
    /// crushed.
    pub(crate) fn striped_combo<R: Rng + ?Sized>(
        &mut self,
        from: (usize, usize),
        to: (usize, usize),
        rng: &mut R,
    ) {
        self.cell_mut(from.0, from.1).take();
        self.cell_mut(to.0, to.1).take();
        self.crush_rect(0, to.1, self.rows - 1, to.1, rng);
        self.crush_rect(to.0, 0, to.0, self.cols - 1, rng);
        self.refill(rng);
    }

    /// Gravity refill: process cells bottom-up, right-to-left; each empty
    /// cell pulls the nearest tile above it down, or takes a fresh random
    /// plain tile when the column above is empty.
    pub(crate) fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in (0..self.rows).rev() {
            for col in (0..self.cols).rev() {
                if !self.cell(row, col).is_empty() {
                    continue;
                }
                for source_row in (0..row).rev() {
                    if let Some(tile) = self.cell_mut(source_row, col).take() {
                        self.cell_mut(row, col).place(tile);
                        break;
                    }
                }
                if self.cell(row, col).is_empty() {
                    let fresh = Tile::random_plain(rng);
                    self.cell_mut(row, col).place(fresh);
                }
            }
        }
    }

    /// True if any horizontal or vertical run of >= 3 same-colored tiles
    /// exists anywhere. Pure check; used to validate prospective swaps.
    pub(crate) fn has_any_run(&self) -> bool {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let Some(color) = self.tile(row, col).and_then(Tile::color) else {
                    continue;
                };
                if col + 2 < self.cols
                    && self.tile(row, col + 1).and_then(Tile::color) == Some(color)
                    && self.tile(row, col + 2).and_then(Tile::color) == Some(color)
                {
                    return true;
                }
                if row + 2 < self.rows
                    && self.tile(row + 1, col).and_then(Tile::color) == Some(color)
                    && self.tile(row + 2, col).and_then(Tile::color) == Some(color)
                {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Direction, GoalSpec, Move};
    use rand::{SeedableRng, rngs::StdRng};

    fn goal() -> GoalSpec {
        GoalSpec::ScoreTarget {
            target: 1_000_000,
            move_budget: 100,
        }
    }

    #[test]
    fn three_run_crushes_for_three_points() {
        // Swapping (1,0) down completes a horizontal 3-run on the bottom row.
        let mut board = Board::from_layout(
            "B G B\n\
             R O Y\n\
             G R R",
            goal(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        board
            .apply_move(Move::new(1, 0, Direction::Down), &mut rng)
            .unwrap();
        assert!(board.score() >= 3);
        assert!(!board.has_any_run());
        assert_eq!(board.move_count(), 1);
    }

    #[test]
    fn four_run_leaves_striped_tile_at_anchor() {
        // Crushing the planted horizontal 4-run must leave a horizontally
        // striped red tile at the run's anchor. The grid is engineered so the
        // refill cannot cascade: every column drops distinct colors.
        let mut board = Board::from_layout(
            "B G Y O B\n\
             G Y O B G\n\
             R R R R P\n\
             Y O B G Y\n\
             O B G Y O",
            goal(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        // No player move needed; stabilize directly on the planted run.
        board.stabilize(&mut rng);
        let anchor = board.tile(2, 0);
        assert!(
            matches!(
                anchor,
                Some(Tile::Striped {
                    color: Color::Red,
                    orientation: Orientation::Horizontal,
                })
            ),
            "expected striped anchor, got {anchor:?}"
        );
    }

    #[test]
    fn horizontal_striped_crush_clears_its_row() {
        let mut board = Board::from_layout(
            "B G Y O B\n\
             G Y O B G\n\
             RH O Y G P\n\
             Y O B G Y\n\
             O B G Y O",
            goal(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        board.crush_at(2, 0, &mut rng);
        for col in 0..5 {
            assert!(board.tile(2, col).is_none(), "col {col} should be empty");
        }
        // Row of five tiles crushed, one point each.
        assert_eq!(board.score(), 5);
        // Other rows untouched.
        assert!(board.tile(1, 2).is_some());
    }

    #[test]
    fn vertical_striped_crush_clears_its_column() {
        let mut board = Board::from_layout(
            "B G Y O B\n\
             G Y O B G\n\
             Y O RV G P\n\
             Y O B G Y\n\
             O B G Y O",
            goal(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        board.crush_at(2, 2, &mut rng);
        for row in 0..5 {
            assert!(board.tile(row, 2).is_none(), "row {row} should be empty");
        }
        assert_eq!(board.score(), 5);
    }

    #[test]
    fn striped_combo_clears_row_and_column() {
        let mut board = Board::from_layout(
            "B G Y O B\n\
             G RV O B G\n\
             Y RH B G P\n\
             Y O B G Y\n\
             O B G Y O",
            goal(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        board
            .apply_move(Move::new(2, 1, Direction::Up), &mut rng)
            .unwrap();
        // Endpoints score nothing; the sweep crushed the three remaining
        // column tiles and four row tiles before any cascade.
        assert!(board.score() >= 7, "score {}", board.score());
        assert_eq!(board.move_count(), 1);
        assert!(!board.has_any_run());
    }

    #[test]
    fn wrapped_pair_clears_every_non_wrapped_cell() {
        let mut board = Board::from_layout(
            "C G Y O B\n\
             G C O B G\n\
             Y C B G P\n\
             Y O B G Y\n\
             O B G Y O",
            goal(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        board
            .apply_move(Move::new(2, 1, Direction::Up), &mut rng)
            .unwrap();
        // 22 plain cells and the 2 emptied endpoints at one point each, +2
        // for consuming the endpoints, +1 for the surviving wrapped tile
        // removed on the following pass, plus whatever the cascades added.
        assert!(board.score() >= 27, "score {}", board.score());
        // The exploding survivor is gone once the board is stable.
        for row in 0..5 {
            for col in 0..5 {
                assert!(!matches!(
                    board.tile(row, col),
                    Some(Tile::Wrapped { exploding: true })
                ));
            }
        }
        assert!(!board.has_any_run());
    }

    #[test]
    fn wrapped_plus_plain_crushes_that_color_everywhere() {
        let mut board = Board::from_layout(
            "B G Y O B\n\
             G C R B G\n\
             Y R B G P\n\
             Y O B G R\n\
             O B G Y O",
            goal(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        // Swap the wrapped tile right into the red plain tile.
        board
            .apply_move(Move::new(1, 1, Direction::Right), &mut rng)
            .unwrap();
        // +2 endpoints, then both remaining red tiles crushed.
        assert!(board.score() >= 4, "score {}", board.score());
        assert!(!board.has_any_run());
    }

    #[test]
    fn crushing_a_jellied_cell_clears_its_jelly() {
        let mut board = Board::from_layout(
            "B G Y O B\n\
             G Y O B G\n\
             RHJ O Y G P\n\
             Y O B G Y\n\
             O B G Y O",
            GoalSpec::JellyClear { jelly: 1 },
        )
        .unwrap();
        assert_eq!(board.active_jelly(), 1);
        let mut rng = StdRng::seed_from_u64(8);
        board.crush_at(2, 0, &mut rng);
        assert_eq!(board.active_jelly(), 0);
        assert!(!board.is_jellied(2, 0));
    }

    #[test]
    fn refill_pulls_tiles_down_and_tops_up() {
        let mut board = Board::from_layout(
            "B G Y\n\
             G Y O\n\
             Y O B",
            goal(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        // Empty the middle cell; its upper neighbor must fall into it.
        board.cell_mut(1, 1).take();
        board.refill(&mut rng);
        assert_eq!(board.tile(1, 1), Some(Tile::Plain { color: Color::Green }));
        // The vacated top cell got a fresh tile.
        assert!(board.tile(0, 1).is_some());
    }

    #[test]
    fn rejected_swap_leaves_board_identical() {
        let mut board = Board::from_layout(
            "B G Y O B\n\
             G Y O B G\n\
             Y O B G P\n\
             Y B O G Y\n\
             O B G Y O",
            goal(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(10);
        let before = board.fingerprint();
        let err = board
            .apply_move(Move::new(0, 0, Direction::Right), &mut rng)
            .unwrap_err();
        assert!(err.is_invalid_move());
        assert_eq!(board.fingerprint(), before);
        assert_eq!(board.score(), 0);
        assert_eq!(board.move_count(), 0);
    }
}
