//! Crawl scheduler - the breadth-first traversal
//!
//! One `CrawlScheduler` drives one run. It owns the visited registry, the
//! frontier, and the optional index sink, so no other code can observe or
//! mutate crawl state while the run is in progress.
//!
//! Per depth `d`:
//! 1. The frontier is `{root}` for `d == 0`, else the filtered children
//!    gathered while processing `d - 1`.
//! 2. Each frontier link not yet visited is marked visited and fetched.
//!    A non-success status skips the link. On success the content is
//!    persisted, children are extracted and filtered into the next level,
//!    and, with indexing on, an edge batch is emitted for this parent.
//! 3. After the last depth the unique-link batch is emitted.
//!
//! The index sink is closed exactly once whether the run completes or aborts.

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::filter::LinkFilter;
use crate::crawler::parser::extract_links_from_bytes;
use crate::index::{Edge, IndexSink, SqliteIndexSink, UniqueLinkRecord};
use crate::output::CrawlReport;
use crate::state::{Frontier, PageOutcome, VisitedRegistry};
use crate::storage::{ContentKind, ContentPersister, FileType};
use crate::SpiderError;

/// Depth-bounded breadth-first crawler
pub struct CrawlScheduler {
    root_site: String,
    pen_depth: u32,
    fetcher: Fetcher,
    filter: LinkFilter,
    persister: ContentPersister,
    index: Option<Box<dyn IndexSink>>,
    visited: VisitedRegistry,
}

impl CrawlScheduler {
    /// Creates a scheduler from configuration.
    ///
    /// Opens the SQLite index when `config.indexing` is present; otherwise
    /// the run never touches a relational sink.
    pub fn new(config: &Config) -> Result<Self, SpiderError> {
        let index = match &config.indexing {
            Some(definitions) => {
                let sink = SqliteIndexSink::open(definitions)?;
                Some(Box::new(sink) as Box<dyn IndexSink>)
            }
            None => None,
        };
        Self::with_index(config, index)
    }

    /// Creates a scheduler with a caller-supplied index sink (or none)
    pub fn with_index(
        config: &Config,
        index: Option<Box<dyn IndexSink>>,
    ) -> Result<Self, SpiderError> {
        let fetcher = Fetcher::new(&config.fetch)?;
        let persister = ContentPersister::new(
            &config.crawler.root_site,
            &config.crawler.raw_files_save_path,
        )?;

        Ok(Self {
            root_site: config.crawler.root_site.clone(),
            pen_depth: config.crawler.pen_depth,
            fetcher,
            filter: LinkFilter::from_config(&config.filter),
            persister,
            index,
            visited: VisitedRegistry::new(),
        })
    }

    pub fn indexing_enabled(&self) -> bool {
        self.index.is_some()
    }

    /// Runs the crawl to completion.
    ///
    /// A transport failure aborts the run and is returned as-is; all
    /// in-memory state is dropped with the scheduler.
    pub async fn run(mut self) -> Result<CrawlReport, SpiderError> {
        tracing::info!(
            "Starting crawl of {} to pen depth {} (indexing {})",
            self.root_site,
            self.pen_depth,
            if self.indexing_enabled() { "on" } else { "off" }
        );

        let mut report = CrawlReport::new(&self.root_site, self.pen_depth);
        let traversal = self.traverse(&mut report).await;
        let closed = self.close_index();

        if let Err(e) = traversal {
            if let Err(close_error) = closed {
                tracing::error!("Failed to close index after abort: {}", close_error);
            }
            tracing::error!("Crawl aborted: {}", e);
            return Err(e);
        }
        closed?;

        report.finish(&self.visited);
        tracing::info!(
            "Crawl completed: {} unique links, {} pages persisted",
            report.unique_links,
            report.persisted()
        );
        Ok(report)
    }

    async fn traverse(&mut self, report: &mut CrawlReport) -> Result<(), SpiderError> {
        let mut frontier = Frontier::seed(&self.root_site);

        for depth in 0..self.pen_depth {
            if depth > 0 {
                frontier.advance();
            }

            if frontier.current().is_empty() {
                tracing::info!("Frontier exhausted at depth {}", depth);
                break;
            }

            tracing::info!(
                "Depth {}/{}: {} links in frontier",
                depth + 1,
                self.pen_depth,
                frontier.current().len()
            );
            report.frontiers.push(frontier.current().clone());

            let level: Vec<String> = frontier.current().iter().cloned().collect();
            for link in &level {
                if !self.visited.add(link) {
                    tracing::debug!("Already visited: {}", link);
                    continue;
                }

                let outcome = self.process_link(depth, link, &mut frontier, report).await?;
                tracing::debug!("{}: {}", link, outcome);
                report.record(outcome);
            }
        }

        if let Some(index) = self.index.as_mut() {
            let records = UniqueLinkRecord::from_registry(&self.visited);
            index.record_unique_links(&records)?;
            tracing::info!("Recorded {} unique links", records.len());
        }

        report.pending = frontier.into_pending();
        Ok(())
    }

    /// Fetches, persists, and expands a single freshly visited link
    async fn process_link(
        &mut self,
        depth: u32,
        link: &str,
        frontier: &mut Frontier,
        report: &mut CrawlReport,
    ) -> Result<PageOutcome, SpiderError> {
        let kind = ContentKind::classify(link);
        if kind == ContentKind::Spreadsheet {
            return Ok(PageOutcome::SkippedSpreadsheet);
        }

        let page = self.fetcher.fetch(link).await?;
        if !page.is_success() {
            tracing::warn!("Skipping {}: HTTP {}", link, page.status);
            return Ok(PageOutcome::SkippedStatus(page.status));
        }

        let file_type = match kind.refine(page.content_type.as_deref()).file_type() {
            Some(file_type) => file_type,
            None => return Ok(PageOutcome::SkippedSpreadsheet),
        };
        let outcome = match file_type {
            FileType::Pdf => PageOutcome::PersistedPdf,
            FileType::Text => PageOutcome::PersistedText,
        };
        self.persister.persist(link, file_type, &page.body)?;

        let children = self.filter.filter(extract_links_from_bytes(&page.body));
        tracing::debug!("{} yielded {} followable links", link, children.len());
        frontier.add_children(children);

        if let Some(index) = self.index.as_mut() {
            // Snapshot of everything gathered at this depth so far, not a delta
            let edges = Edge::batch(depth, link, frontier.children());
            index.record_edges(&edges)?;
            report.edge_batches += 1;
            report.edges += edges.len() as u64;
        }

        Ok(outcome)
    }

    fn close_index(&mut self) -> Result<(), SpiderError> {
        if let Some(mut index) = self.index.take() {
            index.close()?;
        }
        Ok(())
    }
}
