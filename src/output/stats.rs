//! Statistics for a single crawl run
//!
//! This module provides the report returned by a crawl and its console
//! rendering.

use crate::state::{PageOutcome, VisitedRegistry};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub root_site: String,
    pub pen_depth: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Frontier processed at each depth, index 0 being `{root}`
    pub frontiers: Vec<BTreeSet<String>>,

    /// Children found at the last processed depth that were never scheduled
    pub pending: BTreeSet<String>,

    pub persisted_text: u64,
    pub persisted_pdf: u64,
    pub skipped_status: u64,
    pub skipped_spreadsheet: u64,

    /// Edge batches handed to the index, one per successfully fetched parent
    pub edge_batches: u64,
    /// Edges across all batches; batches are cumulative so this double counts
    pub edges: u64,

    pub unique_links: u64,
    /// Every visited link in the order it was claimed
    pub visited: Vec<String>,
}

impl CrawlReport {
    pub fn new(root_site: &str, pen_depth: u32) -> Self {
        Self {
            root_site: root_site.to_string(),
            pen_depth,
            started_at: Utc::now(),
            finished_at: None,
            frontiers: Vec::new(),
            pending: BTreeSet::new(),
            persisted_text: 0,
            persisted_pdf: 0,
            skipped_status: 0,
            skipped_spreadsheet: 0,
            edge_batches: 0,
            edges: 0,
            unique_links: 0,
            visited: Vec::new(),
        }
    }

    /// Tallies the outcome of one visited link
    pub fn record(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::PersistedText => self.persisted_text += 1,
            PageOutcome::PersistedPdf => self.persisted_pdf += 1,
            PageOutcome::SkippedStatus(_) => self.skipped_status += 1,
            PageOutcome::SkippedSpreadsheet => self.skipped_spreadsheet += 1,
        }
    }

    /// Stamps the finish time and captures the visited set
    pub fn finish(&mut self, visited: &VisitedRegistry) {
        self.finished_at = Some(Utc::now());
        self.visited = visited.iter().map(str::to_string).collect();
        self.unique_links = self.visited.len() as u64;
    }

    pub fn persisted(&self) -> u64 {
        self.persisted_text + self.persisted_pdf
    }

    /// Number of HTTP requests issued
    pub fn fetches(&self) -> u64 {
        self.persisted() + self.skipped_status
    }

    /// Frontier at `depth`, if that depth was reached
    pub fn frontier(&self, depth: usize) -> Option<&BTreeSet<String>> {
        self.frontiers.get(depth)
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Run:");
    println!("  Root site: {}", report.root_site);
    println!("  Pen depth: {}", report.pen_depth);
    println!("  Started: {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = report.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Frontier by Depth:");
    for (depth, frontier) in report.frontiers.iter().enumerate() {
        println!("  Depth {}: {} links", depth, frontier.len());
    }
    if !report.pending.is_empty() {
        println!("  Beyond pen depth: {} links", report.pending.len());
    }
    println!();

    println!("Pages:");
    println!("  Unique links visited: {}", report.unique_links);
    println!("  Requests issued: {}", report.fetches());
    println!("  Saved as text: {}", report.persisted_text);
    println!("  Saved as PDF: {}", report.persisted_pdf);
    println!("  Skipped (bad status): {}", report.skipped_status);
    println!("  Skipped (spreadsheet): {}", report.skipped_spreadsheet);
    println!();

    if report.edge_batches > 0 {
        println!("Index:");
        println!("  Edge batches: {}", report.edge_batches);
        println!("  Edge rows: {}", report.edges);
        println!();
    }

    let success_rate = if report.fetches() > 0 {
        (report.persisted() as f64 / report.fetches() as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Success Rate: {:.1}% ({} / {} requests persisted)",
        success_rate,
        report.persisted(),
        report.fetches()
    );
}
