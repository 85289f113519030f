//! Depth Spider: a depth-bounded breadth-first web spider
//!
//! This crate walks a website level by level from a root page, keeps every
//! fetched page as a raw file on disk, and can optionally record the
//! discovered parent/child link graph and the set of visited links in SQLite.

pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod state;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for spider operations
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any network-level failure while fetching a page. Aborts the run.
    #[error("Transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid SQL identifier in indexing config: '{0}'")]
    InvalidIdentifier(String),

    #[error("File type flag must be 'pdf' or 'txt', got '{0}'")]
    UnknownFileType(String),
}

/// Result type alias for spider operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlScheduler, LinkFilter};
pub use output::CrawlReport;
pub use state::{PageOutcome, VisitedRegistry};
