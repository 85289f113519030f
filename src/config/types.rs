use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the spider
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    /// Absent means indexing is off and the relational sink is never touched
    #[serde(default)]
    pub indexing: Option<IndexingConfig>,
}

/// What to crawl and where the raw files go
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// The homepage the traversal starts from
    #[serde(rename = "root-site")]
    pub root_site: String,

    /// Number of breadth-first levels to traverse, root inclusive
    #[serde(rename = "pen-depth")]
    pub pen_depth: u32,

    /// Local directory receiving one file per fetched page
    #[serde(rename = "raw-files-save-path")]
    pub raw_files_save_path: PathBuf,
}

/// HTTP behaviour of the fetcher
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Lower bound of the random delay before every request (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the random delay before every request (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "allow-redirects")]
    pub allow_redirects: bool,

    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 40_000,
            max_delay_ms: 90_000,
            timeout_secs: 20,
            allow_redirects: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_2) \
     AppleWebKit/601.3.9 (KHTML, like Gecko) Version/9.0.2 Safari/601.3.9";

/// Substrings that keep the spider away from careers, login, payment,
/// contact and social media pages.
pub const DEFAULT_DENY_WORDS: &[&str] = &[
    "career",
    "login",
    "pay",
    "your",
    "account",
    "auth",
    "contact",
    "activate",
    "reservation",
    "book",
    "tel",
    "facebook",
    "instagram",
    "subscribe",
    "google",
    "linkedin",
    "youtube",
    "mail",
    "app",
    "App",
];

/// How deny-words are matched against a candidate link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// A link is dropped only when it contains every deny-word.
    #[default]
    AllWords,
    /// A link is dropped when it contains any deny-word.
    AnyWord,
}

/// Link filter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    #[serde(rename = "deny-words")]
    pub deny_words: Vec<String>,

    #[serde(rename = "match-mode")]
    pub match_mode: MatchMode,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            deny_words: DEFAULT_DENY_WORDS.iter().map(|w| w.to_string()).collect(),
            match_mode: MatchMode::default(),
        }
    }
}

/// Where edges and unique links are recorded
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: PathBuf,

    #[serde(rename = "edges-schema")]
    pub edges_schema: String,

    #[serde(rename = "edges-table")]
    pub edges_table: String,

    #[serde(rename = "unique-links-schema")]
    pub unique_links_schema: String,

    #[serde(rename = "unique-links-table")]
    pub unique_links_table: String,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("spider_index.db"),
            edges_schema: "main".to_string(),
            edges_table: "indexing".to_string(),
            unique_links_schema: "main".to_string(),
            unique_links_table: "unique_links".to_string(),
        }
    }
}
