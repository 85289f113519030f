//! Index sink trait and error types
//!
//! This module defines the interface the crawl scheduler uses to hand link
//! graph records to an external relational store.

use crate::index::{Edge, UniqueLinkRecord};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while recording index data
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Index target flag must be 'edges' or 'unique_links', got '{0}'")]
    UnknownTarget(String),

    #[error("Invalid index definition: {0}")]
    Definition(String),

    #[error("Index database not found: {0}")]
    MissingDatabase(PathBuf),

    #[error("Index sink is already closed")]
    Closed,
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Append-only destination for the crawl's link graph.
///
/// Both record operations append; neither deduplicates against earlier
/// batches. `close` is called exactly once at the end of a run, including
/// runs that abort.
pub trait IndexSink {
    /// Appends a batch of parent/child edges
    fn record_edges(&mut self, edges: &[Edge]) -> IndexResult<()>;

    /// Appends the final set of unique links
    fn record_unique_links(&mut self, links: &[UniqueLinkRecord]) -> IndexResult<()>;

    /// Releases the underlying connection
    fn close(&mut self) -> IndexResult<()>;
}
