//! State module for tracking crawl progress
//!
//! This module holds the in-memory state owned by a single crawl run.
//!
//! # Components
//!
//! - `VisitedRegistry`: every link claimed for fetching, append-only
//! - `Frontier`: the current depth's links and the children gathered for the next
//! - `PageOutcome`: how each visited link ended up

mod frontier;
mod page_state;
mod visited;

// Re-export main types
pub use frontier::Frontier;
pub use page_state::PageOutcome;
pub use visited::VisitedRegistry;
