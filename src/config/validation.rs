use crate::config::types::{Config, CrawlerConfig, FetchConfig, FilterConfig, IndexingConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_filter_config(&config.filter)?;
    if let Some(indexing) = &config.indexing {
        validate_indexing_config(indexing)?;
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let root = Url::parse(&config.root_site)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-site: {}", e)))?;

    if !matches!(root.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "root-site must use http or https, got '{}'",
            root.scheme()
        )));
    }

    if config.pen_depth < 1 {
        return Err(ConfigError::Validation(
            "pen-depth must be >= 1 (1 crawls only the root)".to_string(),
        ));
    }

    if config.raw_files_save_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "raw-files-save-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.min_delay_ms > config.max_delay_ms {
        return Err(ConfigError::Validation(format!(
            "min-delay-ms ({}) must not exceed max-delay-ms ({})",
            config.min_delay_ms, config.max_delay_ms
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    if config.deny_words.iter().any(|w| w.is_empty()) {
        return Err(ConfigError::Validation(
            "deny-words cannot contain an empty string".to_string(),
        ));
    }

    if config.deny_words.is_empty() {
        tracing::warn!("deny-words is empty; under all-words matching no link will be followed");
    }

    Ok(())
}

/// Validates the indexing bundle: every schema and table name must be a
/// plain SQL identifier since they are spliced into statements.
fn validate_indexing_config(config: &IndexingConfig) -> Result<(), ConfigError> {
    if config.database_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "indexing database-path cannot be empty".to_string(),
        ));
    }

    for identifier in [
        &config.edges_schema,
        &config.edges_table,
        &config.unique_links_schema,
        &config.unique_links_table,
    ] {
        validate_identifier(identifier)?;
    }

    if config.edges_schema == config.unique_links_schema
        && config.edges_table == config.unique_links_table
    {
        return Err(ConfigError::Validation(format!(
            "edges and unique links cannot share the table '{}.{}'",
            config.edges_schema, config.edges_table
        )));
    }

    Ok(())
}

/// Accepts `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn validate_identifier(identifier: &str) -> Result<(), ConfigError> {
    let mut chars = identifier.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(identifier.to_string()))
    }
}
