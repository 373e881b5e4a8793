//! Positional heuristic for speculative board states
//!
//! Scores a child state relative to the parent it was expanded from. The
//! value combines the realized score gain with the latent potential still
//! sitting on the board: striped and wrapped tiles, their pairings, and
//! same-color adjacency.

use std::collections::BTreeMap;

use rand::{Rng, RngCore};

use crate::board::{Board, Color, Orientation, Tile};

/// Neighborhoods of wrapped tiles, keyed by position. An entry flipped to
/// `None` marks a wrapped tile that is part of an adjacent wrapped pair; the
/// pair is valued as a unit and the tile no longer counts individually.
type WrappedRegistry = BTreeMap<(usize, usize), Option<Vec<(usize, usize)>>>;

/// Heuristic value of `child`, expanded from `parent` by one move.
///
/// Once the move budget is exhausted there is nothing left to set up, so the
/// value collapses to the raw score. Otherwise each cell is examined against
/// its right and down neighbors (left/up adjacencies are covered by the
/// neighbor's own scan):
///
/// - adjacent striped pairs are worth `rows + cols` each;
/// - adjacent wrapped pairs are worth `rows * cols` each;
/// - a lone wrapped tile is worth its best colored neighbor: the board-wide
///   count of that color, with striped neighbors valued as one full row or
///   column (drawn at random) per tile of their color;
/// - same-color adjacency earns 1 per plain pair, or a third of a row or
///   column when one side is striped;
/// - the score gained over the parent is added in directly.
pub fn evaluate(parent: &Board, child: &Board, rng: &mut dyn RngCore) -> f64 {
    if let Some(budget) = child.goal().move_budget()
        && child.move_count() >= budget
    {
        return child.score() as f64;
    }

    let rows = child.rows();
    let cols = child.cols();

    let mut registry = WrappedRegistry::new();
    let mut color_count = [0usize; Color::ALL.len()];
    let mut pair_striped = 0usize;
    let mut pair_wrapped = 0usize;
    let mut proximity = 0.0f64;

    let stripe_weight = |orientation: Orientation| -> f64 {
        match orientation {
            Orientation::Vertical => rows as f64 / 3.0,
            Orientation::Horizontal => cols as f64 / 3.0,
        }
    };

    for row in 0..rows {
        for col in 0..cols {
            let Some(tile) = child.tile(row, col) else {
                continue;
            };
            let here = (row, col);
            let mut neighbors = Vec::with_capacity(2);
            if col + 1 < cols {
                neighbors.push((row, col + 1));
            }
            if row + 1 < rows {
                neighbors.push((row + 1, col));
            }

            match tile {
                Tile::Wrapped { .. } => {
                    registry.entry(here).or_insert_with(|| Some(Vec::new()));
                    for at in neighbors {
                        let Some(other) = child.tile(at.0, at.1) else {
                            continue;
                        };
                        if other.is_wrapped() {
                            pair_wrapped += 1;
                            registry.insert(here, None);
                            registry.insert(at, None);
                        } else if let Some(Some(list)) = registry.get_mut(&here) {
                            list.push(at);
                        }
                    }
                }
                Tile::Striped { color, orientation } => {
                    color_count[color as usize] += 1;
                    for at in neighbors {
                        match child.tile(at.0, at.1) {
                            Some(Tile::Wrapped { .. }) => register(&mut registry, at, here),
                            Some(Tile::Striped { .. }) => pair_striped += 1,
                            Some(Tile::Plain { color: c }) if c == color => {
                                proximity += stripe_weight(orientation);
                            }
                            _ => {}
                        }
                    }
                }
                Tile::Plain { color } => {
                    color_count[color as usize] += 1;
                    for at in neighbors {
                        match child.tile(at.0, at.1) {
                            Some(Tile::Wrapped { .. }) => register(&mut registry, at, here),
                            Some(Tile::Striped {
                                color: c,
                                orientation,
                            }) if c == color => {
                                proximity += stripe_weight(orientation);
                            }
                            Some(Tile::Plain { color: c }) if c == color => {
                                proximity += 1.0;
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
    }

    let mut h = pair_striped as f64 * (rows + cols) as f64;

    for neighborhood in registry.values() {
        let Some(neighbors) = neighborhood else {
            continue;
        };
        let mut best = 0.0f64;
        for &(r, c) in neighbors {
            let value = match child.tile(r, c) {
                Some(Tile::Striped { color, .. }) => {
                    // Clearing through a wrapped tile converts every tile of
                    // this color to striped with random orientation; value
                    // each as a full row or column accordingly.
                    let mut value = 0.0;
                    for _ in 0..color_count[color as usize] {
                        let axis = if rng.random_bool(0.5) { rows } else { cols };
                        value += axis as f64;
                    }
                    value
                }
                Some(Tile::Plain { color }) => color_count[color as usize] as f64,
                _ => 0.0,
            };
            if value > best {
                best = value;
            }
        }
        h += best + 1.0;
    }

    h += pair_wrapped as f64 * (rows * cols) as f64;
    h += proximity;
    h += child.score() as f64 - parent.score() as f64;
    h
}

/// Record `tile_at` as a colored neighbor of the wrapped tile at `wrapped`,
/// unless that wrapped tile is already part of a pair.
fn register(registry: &mut WrappedRegistry, wrapped: (usize, usize), tile_at: (usize, usize)) {
    match registry.entry(wrapped).or_insert_with(|| Some(Vec::new())) {
        Some(list) => list.push(tile_at),
        None => {}
    }
}
