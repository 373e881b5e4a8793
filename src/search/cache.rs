//! Memoized expansions keyed by board fingerprint

use std::collections::HashMap;

use crate::board::Board;

/// A scored candidate expansion: the resulting board and its heuristic value.
pub type ScoredChild = (Board, f64);

/// Cache of previously expanded states.
///
/// Keys are board fingerprints, which are lossy: boards differing only in
/// exploding wrapped markers share an entry. Values are the full sorted
/// candidate lists as generated, before any beam truncation, so one entry
/// serves every beam width.
#[derive(Debug, Default)]
pub struct StateCache {
    entries: HashMap<String, Vec<ScoredChild>>,
    hits: u64,
}

impl StateCache {
    pub fn new() -> StateCache {
        StateCache::default()
    }

    /// Look up the expansion for a fingerprint, counting a hit when found.
    pub fn lookup(&mut self, fingerprint: &str) -> Option<&[ScoredChild]> {
        let found = self.entries.get(fingerprint);
        if found.is_some() {
            self.hits += 1;
        }
        found.map(Vec::as_slice)
    }

    /// Store an expansion unless the fingerprint is already present.
    pub fn store(&mut self, fingerprint: String, children: Vec<ScoredChild>) {
        self.entries.entry(fingerprint).or_insert(children);
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
