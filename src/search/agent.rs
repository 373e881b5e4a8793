//! Beam-limited lookahead agent

use std::cmp::Reverse;

use rand::RngCore;

use crate::{
    Error, Result,
    board::{Board, Direction, Move},
    policy::{MAX_SHUFFLE_RETRIES, MovePolicy},
    search::{ScoredChild, SearchTree, StateCache, heuristic},
};

/// Lookahead move policy.
///
/// Each turn the agent grows a tree of speculative states from the live
/// board: every node is expanded by trying the right/down swap of every cell,
/// scoring the survivors with the positional heuristic, and keeping only the
/// best `beam_width` of them. The beam narrows to its integer square root at
/// each level, so deep searches stay cheap. Leaf scores are then folded
/// upward (each internal node averages its own score with its children's
/// mean) and the root child with the highest folded score supplies the move.
pub struct SearchAgent {
    depth_limit: u32,
    beam_width: usize,
    cache: Option<StateCache>,
    children_generated: u64,
}

impl SearchAgent {
    /// # Errors
    ///
    /// Depth and beam width must both be at least 1.
    pub fn new(depth_limit: u32, beam_width: usize) -> Result<SearchAgent> {
        if depth_limit == 0 {
            return Err(Error::InvalidConfiguration {
                message: "search depth must be at least 1".to_string(),
            });
        }
        if beam_width == 0 {
            return Err(Error::InvalidConfiguration {
                message: "beam width must be at least 1".to_string(),
            });
        }
        Ok(SearchAgent {
            depth_limit,
            beam_width,
            cache: None,
            children_generated: 0,
        })
    }

    /// Enable fingerprint-keyed memoization of expansions.
    #[must_use]
    pub fn with_cache(mut self) -> SearchAgent {
        self.cache = Some(StateCache::new());
        self
    }

    /// Cache hits so far; zero when the cache is disabled.
    pub fn cache_hits(&self) -> u64 {
        self.cache.as_ref().map_or(0, StateCache::hits)
    }

    /// Expand one node: generate scored candidates (or fetch them from the
    /// cache), sort, truncate to the beam, and attach the survivors.
    ///
    /// A node whose move budget is spent stays a leaf. A node with no legal
    /// move anywhere is reshuffled in place until one appears, within the
    /// shuffle cap.
    fn expand(
        &mut self,
        tree: &mut SearchTree,
        id: usize,
        beam: usize,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        if let Some(budget) = tree.node(id).board.goal().move_budget()
            && tree.node(id).board.move_count() >= budget
        {
            return Ok(());
        }

        let mut shuffles = 0;
        let candidates = loop {
            let parent = &tree.node(id).board;
            if let Some(cache) = self.cache.as_mut()
                && let Some(cached) = cache.lookup(&parent.fingerprint())
            {
                break cached.to_vec();
            }

            let mut found: Vec<ScoredChild> = Vec::new();
            for row in 0..parent.rows() {
                for col in 0..parent.cols() {
                    for direction in [Direction::Right, Direction::Down] {
                        let mut child = parent.clone();
                        match child.apply_move(Move::new(row, col, direction), rng) {
                            Ok(()) => {
                                let score = heuristic::evaluate(parent, &child, rng);
                                found.push((child, score));
                            }
                            Err(err) if err.is_invalid_move() => {}
                            Err(err) => return Err(err),
                        }
                    }
                }
            }

            if !found.is_empty() {
                // Stable sorts: heuristic score decides, deeper affected
                // rows break ties.
                found.sort_by_key(|(board, _)| Reverse(avg_affected_row(board)));
                found.sort_by(|a, b| b.1.total_cmp(&a.1));
                if let Some(cache) = self.cache.as_mut() {
                    cache.store(parent.fingerprint(), found.clone());
                }
                break found;
            }

            if shuffles >= MAX_SHUFFLE_RETRIES {
                return Err(Error::ShuffleExhausted { attempts: shuffles });
            }
            tree.node_mut(id).board.shuffle(rng);
            shuffles += 1;
        };

        for (board, score) in candidates.into_iter().take(beam) {
            tree.push_child(id, board, score);
        }
        Ok(())
    }
}

impl MovePolicy for SearchAgent {
    fn play_move(&mut self, board: &mut Board, rng: &mut dyn RngCore) -> Result<()> {
        if board.is_finished() {
            return Err(Error::InvalidConfiguration {
                message: "cannot search from a finished game".to_string(),
            });
        }

        let mut tree = SearchTree::with_root(board.clone());
        let root = tree.root();
        self.expand(&mut tree, root, self.beam_width, rng)?;
        // A dead position (no legal move anywhere) is reshuffled in place
        // during expansion. That happened to the root's copy of the live
        // board; carry it over so the committed child move stays legal.
        board.clone_from(&tree.node(root).board);

        let mut frontier = tree.children(root).to_vec();
        let mut beam = self.beam_width.isqrt();
        let mut level = 1;
        while level < self.depth_limit && !frontier.is_empty() {
            let mut next = Vec::new();
            for id in frontier {
                self.expand(&mut tree, id, beam, rng)?;
                next.extend_from_slice(tree.children(id));
            }
            frontier = next;
            beam = beam.isqrt();
            level += 1;
        }

        tree.backpropagate();
        self.children_generated += tree.children(root).len() as u64;

        let mut best: Option<usize> = None;
        for &child in tree.children(root) {
            best = match best {
                Some(current) if tree.node(child).score <= tree.node(current).score => {
                    Some(current)
                }
                _ => Some(child),
            };
        }
        let best = best.expect("an unfinished root always expands to at least one child");
        let mv = tree
            .node(best)
            .board
            .last_move()
            .expect("child nodes record their originating move");
        board.apply_move(mv, rng)
    }

    fn name(&self) -> &'static str {
        "search"
    }

    fn reset(&mut self) {
        self.children_generated = 0;
    }

    fn children_generated(&self) -> u64 {
        self.children_generated
    }
}

/// Mean row touched by the move that produced this state, used as the sort
/// tie-break: moves lower on the board shake more tiles loose when the
/// cascade refills.
fn avg_affected_row(board: &Board) -> i64 {
    let Some(mv) = board.last_move() else {
        return 0;
    };
    let row = mv.row as i64;
    match mv.direction {
        Direction::Up => row - 1,
        Direction::Down => row + 1,
        Direction::Left | Direction::Right => row,
    }
}
