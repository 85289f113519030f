//! Output module for crawl results
//!
//! Raw page content is written by `storage`; this module only summarizes
//! what a run did.

mod stats;

pub use stats::{print_report, CrawlReport};
