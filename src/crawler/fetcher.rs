//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the spider:
//! - Building the HTTP client with the configured user agent and timeout
//! - A random politeness delay before every request
//! - Plain GET requests, redirects off unless configured
//!
//! There is no retry. A transport failure is returned as
//! `SpiderError::Transport` and ends the run; a non-success status is
//! returned as an ordinary `FetchedPage` for the caller to skip.

use crate::config::FetchConfig;
use crate::SpiderError;
use rand::Rng;
use reqwest::{header, redirect::Policy, Client};
use std::time::Duration;

/// Maximum redirect hops when redirects are enabled
const MAX_REDIRECTS: usize = 10;

/// A completed HTTP exchange
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value, if present
    pub content_type: Option<String>,
    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use depth_spider::config::FetchConfig;
/// use depth_spider::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let redirect = if config.allow_redirects {
        Policy::limited(MAX_REDIRECTS)
    } else {
        Policy::none()
    };

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Rate-limited page fetcher
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    min_delay: Duration,
    max_delay: Duration,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, SpiderError> {
        let client = build_http_client(config).map_err(SpiderError::Client)?;
        Ok(Self {
            client,
            min_delay: Duration::from_millis(config.min_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        })
    }

    /// Picks a delay uniformly from `[min_delay, max_delay]`
    pub fn politeness_delay(&self) -> Duration {
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        if min >= max {
            return self.min_delay;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    /// Sleeps for the politeness delay, then GETs `link`.
    ///
    /// `link` is used as-is; a relative link fails here as a transport error.
    pub async fn fetch(&self, link: &str) -> Result<FetchedPage, SpiderError> {
        let delay = self.politeness_delay();
        if !delay.is_zero() {
            tracing::trace!("Sleeping {:?} before {}", delay, link);
            tokio::time::sleep(delay).await;
        }

        let transport = |source: reqwest::Error| SpiderError::Transport {
            url: link.to_string(),
            source,
        };

        let response = self.client.get(link).send().await.map_err(transport)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(transport)?.to_vec();

        tracing::debug!("GET {} -> {} ({} bytes)", link, status, body.len());

        Ok(FetchedPage {
            status,
            content_type,
            body,
        })
    }
}
