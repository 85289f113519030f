//! Index module for recording the discovered link graph
//!
//! When indexing is enabled the crawl emits two kinds of records:
//! - `Edge` batches, one per successfully fetched parent
//! - a single `UniqueLinkRecord` batch at the end of the run
//!
//! They are handed to an `IndexSink`; `SqliteIndexSink` is the bundled one.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteIndexSink;
pub use traits::{IndexError, IndexResult, IndexSink};

use crate::state::VisitedRegistry;
use std::fmt;
use std::str::FromStr;

/// "At `depth`, `parent` links to `child`"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    /// 0-based depth at which the parent was fetched
    pub depth: u32,
    pub parent: String,
    pub child: String,
}

impl Edge {
    /// Builds one edge per child for a single parent
    pub fn batch<'a, I>(depth: u32, parent: &str, children: I) -> Vec<Edge>
    where
        I: IntoIterator<Item = &'a String>,
    {
        children
            .into_iter()
            .map(|child| Edge {
                depth,
                parent: parent.to_string(),
                child: child.clone(),
            })
            .collect()
    }
}

/// A visited link with its sequential id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueLinkRecord {
    pub link_id: i64,
    pub link: String,
}

impl UniqueLinkRecord {
    /// Numbers the registry's links from 0 in insertion order
    pub fn from_registry(registry: &VisitedRegistry) -> Vec<UniqueLinkRecord> {
        registry
            .iter()
            .zip(0_i64..)
            .map(|(link, link_id)| UniqueLinkRecord {
                link_id,
                link: link.to_string(),
            })
            .collect()
    }
}

/// Which relational target a write goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTarget {
    Edges,
    UniqueLinks,
}

impl IndexTarget {
    pub fn as_flag(&self) -> &'static str {
        match self {
            Self::Edges => "edges",
            Self::UniqueLinks => "unique_links",
        }
    }
}

impl FromStr for IndexTarget {
    type Err = IndexError;

    /// `"index"` is accepted as an alias for the edges target
    fn from_str(flag: &str) -> Result<Self, Self::Err> {
        match flag {
            "edges" | "index" => Ok(Self::Edges),
            "unique_links" => Ok(Self::UniqueLinks),
            other => Err(IndexError::UnknownTarget(other.to_string())),
        }
    }
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}
