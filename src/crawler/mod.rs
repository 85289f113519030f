//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a randomized politeness delay
//! - Anchor extraction from fetched HTML
//! - Deny-list link filtering
//! - The level-by-level crawl scheduler

mod fetcher;
mod filter;
mod parser;
mod scheduler;

pub use fetcher::{build_http_client, FetchedPage, Fetcher};
pub use filter::LinkFilter;
pub use parser::{extract_links, extract_links_from_bytes};
pub use scheduler::CrawlScheduler;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::SpiderError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the index database if indexing is configured
/// 2. Build the HTTP client and prepare the save directory
/// 3. Traverse the site breadth-first up to the pen depth
/// 4. Record unique links and release the index connection
///
/// # Arguments
///
/// * `config` - The spider configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(SpiderError)` - Crawl could not start or was aborted
pub async fn crawl(config: &Config) -> Result<CrawlReport, SpiderError> {
    CrawlScheduler::new(config)?.run().await
}
