//! Link filtering
//!
//! Decides which raw anchor targets are safe to follow. The default
//! `AllWords` mode drops a candidate only when it contains *every* deny-word;
//! one absent deny-word is enough for it to survive. `AnyWord` drops a
//! candidate as soon as it contains any deny-word and must be opted into.

use crate::config::{FilterConfig, MatchMode};
use std::collections::BTreeSet;

/// Deny-list based link filter
#[derive(Debug, Clone)]
pub struct LinkFilter {
    deny_words: Vec<String>,
    mode: MatchMode,
}

impl LinkFilter {
    pub fn new(deny_words: Vec<String>, mode: MatchMode) -> Self {
        Self { deny_words, mode }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.deny_words.clone(), config.match_mode)
    }

    /// Returns true if `candidate` may be followed.
    ///
    /// Missing, empty, and `"/"` candidates never pass. With an empty
    /// deny-list, `AllWords` passes nothing and `AnyWord` passes everything.
    pub fn allows(&self, candidate: Option<&str>) -> bool {
        let link = match candidate {
            Some(link) if !link.is_empty() && link != "/" => link,
            _ => return false,
        };

        match self.mode {
            MatchMode::AllWords => self.deny_words.iter().any(|word| !link.contains(word)),
            MatchMode::AnyWord => !self.deny_words.iter().any(|word| link.contains(word)),
        }
    }

    /// Reduces raw candidates to the set of links worth following
    pub fn filter<I, S>(&self, candidates: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut kept = BTreeSet::new();
        for candidate in candidates {
            let candidate: Option<&str> = candidate.as_ref().map(AsRef::as_ref);
            if self.allows(candidate) {
                if let Some(link) = candidate {
                    kept.insert(link.to_string());
                }
            } else {
                tracing::trace!("Filtered out link: {:?}", candidate);
            }
        }
        kept
    }
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}
