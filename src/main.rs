//! Depth Spider main entry point
//!
//! This is the command-line harness around the depth-bounded spider.

use anyhow::Context;
use clap::Parser;
use depth_spider::config::{load_config_with_hash, Config};
use depth_spider::crawler::crawl;
use depth_spider::index::{IndexSink, IndexTarget, SqliteIndexSink};
use depth_spider::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Depth Spider: a depth-bounded breadth-first web spider
///
/// Crawls a site level by level from its root page, saves every fetched page
/// to disk, and optionally records the link graph in SQLite.
#[derive(Parser, Debug)]
#[command(name = "depth-spider")]
#[command(version)]
#[command(about = "A depth-bounded breadth-first web spider", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show row counts from the index database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("depth_spider=info,warn"),
            1 => EnvFilter::new("depth_spider=debug,info"),
            2 => EnvFilter::new("depth_spider=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Depth Spider Dry Run ===\n");

    println!("Crawler:");
    println!("  Root site: {}", config.crawler.root_site);
    println!("  Pen depth: {}", config.crawler.pen_depth);
    println!(
        "  Save path: {}",
        config.crawler.raw_files_save_path.display()
    );

    println!("\nFetch:");
    println!(
        "  Delay: {}-{}ms",
        config.fetch.min_delay_ms, config.fetch.max_delay_ms
    );
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  Follow redirects: {}", config.fetch.allow_redirects);
    println!("  User agent: {}", config.fetch.user_agent);

    println!(
        "\nFilter ({:?}, {} deny-words):",
        config.filter.match_mode,
        config.filter.deny_words.len()
    );
    println!("  {}", config.filter.deny_words.join(", "));

    match &config.indexing {
        Some(indexing) => {
            println!("\nIndexing:");
            println!("  Database: {}", indexing.database_path.display());
            println!(
                "  Edges: {}.{}",
                indexing.edges_schema, indexing.edges_table
            );
            println!(
                "  Unique links: {}.{}",
                indexing.unique_links_schema, indexing.unique_links_table
            );
        }
        None => println!("\nIndexing: off"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows row counts per index target
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let indexing = config
        .indexing
        .as_ref()
        .context("indexing is not configured; there is no database to inspect")?;

    println!("Database: {}\n", indexing.database_path.display());

    let mut sink = SqliteIndexSink::open_read_only(indexing)?;
    for target in [IndexTarget::Edges, IndexTarget::UniqueLinks] {
        println!(
            "  {} ({}): {} rows",
            target,
            sink.table_for(target),
            sink.count(target)?
        );
    }
    sink.close()?;

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    match crawl(config).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
