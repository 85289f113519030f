//! Per-depth frontier bookkeeping

use std::collections::BTreeSet;

/// The set of links scheduled at one depth, plus the filtered children
/// accumulated while that depth is being processed.
///
/// Iteration order over the current level is lexicographic. Callers must not
/// rely on it beyond that it is deterministic.
#[derive(Debug, Clone)]
pub struct Frontier {
    current: BTreeSet<String>,
    children: BTreeSet<String>,
}

impl Frontier {
    /// Depth 0 holds exactly the root link
    pub fn seed(root: &str) -> Self {
        Self {
            current: BTreeSet::from([root.to_string()]),
            children: BTreeSet::new(),
        }
    }

    /// Links to fetch at the current depth
    pub fn current(&self) -> &BTreeSet<String> {
        &self.current
    }

    /// Children accumulated so far at this depth
    pub fn children(&self) -> &BTreeSet<String> {
        &self.children
    }

    pub fn add_children<I>(&mut self, links: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.children.extend(links);
    }

    /// Moves to the next depth: the accumulated children become the new
    /// current level
    pub fn advance(&mut self) {
        self.current = std::mem::take(&mut self.children);
    }

    /// Consumes the frontier, yielding children accumulated but never scheduled
    pub fn into_pending(self) -> BTreeSet<String> {
        self.children
    }
}
