//! Crawl-wide deduplication of links

use std::collections::HashSet;

/// Append-only set of every link the spider has claimed for fetching.
///
/// A link present here is never fetched again during the same run, no matter
/// how many parents reference it or at which depth it reappears. Insertion
/// order is remembered so the unique-link ids handed to the index are stable.
#[derive(Debug, Default, Clone)]
pub struct VisitedRegistry {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.seen.contains(link)
    }

    /// Marks a link as visited. Returns false if it was already present.
    pub fn add(&mut self, link: &str) -> bool {
        if self.seen.contains(link) {
            return false;
        }
        self.seen.insert(link.to_string());
        self.order.push(link.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visited links in the order they were first added
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
