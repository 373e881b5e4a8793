//! Arena-allocated search tree

use crate::board::Board;

/// A node in the lookahead tree: a speculative board state and its heuristic
/// score. The score of an internal node is folded together with the mean of
/// its children's scores during backpropagation.
#[derive(Debug)]
pub struct SearchNode {
    pub board: Board,
    pub score: f64,
    pub depth: u32,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Index-based tree arena. Children are always pushed after their parent, so
/// a child's index is strictly greater than its parent's; walking the arena
/// in reverse index order therefore visits every node after all of its
/// descendants.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// A fresh tree holding only the root state, scored at zero.
    pub fn with_root(board: Board) -> SearchTree {
        SearchTree {
            nodes: vec![SearchNode {
                board,
                score: 0.0,
                depth: 0,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn node(&self, id: usize) -> &SearchNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: usize) -> &mut SearchNode {
        &mut self.nodes[id]
    }

    pub fn children(&self, id: usize) -> &[usize] {
        &self.nodes[id].children
    }

    /// Append a child of `parent`, returning its index.
    pub fn push_child(&mut self, parent: usize, board: Board, score: f64) -> usize {
        let id = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(SearchNode {
            board,
            score,
            depth,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Fold leaf scores upward: every internal node's score becomes the mean
    /// of its own score and the average of its children's scores.
    ///
    /// Walking in reverse index order guarantees children are finalized
    /// before their parent is visited.
    pub fn backpropagate(&mut self) {
        for id in (0..self.nodes.len()).rev() {
            if self.nodes[id].children.is_empty() {
                continue;
            }
            let sum: f64 = self.nodes[id]
                .children
                .iter()
                .map(|&child| self.nodes[child].score)
                .sum();
            let mean = sum / self.nodes[id].children.len() as f64;
            let own = self.nodes[id].score;
            self.nodes[id].score = (own + mean) / 2.0;
        }
    }
}
