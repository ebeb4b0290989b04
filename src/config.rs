//! Runtime configuration for the E-utilities client.
//!
//! A single `FetcherConfig` value is built by the CLI and handed to
//! [`PubmedClient::new`](crate::pubmed::PubmedClient::new). Nothing reads
//! configuration from global state.

use crate::error::{FetcherError, Result};
use std::time::Duration;
use url::Url;

/// E-utilities search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";

/// E-utilities summary endpoint
pub const DEFAULT_SUMMARY_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi";

/// Default number of records to fetch
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Largest result count accepted. All IDs go into one esummary GET, and NCBI
/// asks for POST beyond roughly 200 IDs.
pub const MAX_RESULTS: u32 = 200;

/// Upper bound on `FetcherConfig::max_retries`
pub const MAX_RETRIES: u32 = 5;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// esearch endpoint
    pub search_url: String,
    /// esummary endpoint
    pub summary_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts after the first failure of a transient kind
    pub max_retries: u32,
    /// Wait before the first retry; doubled for each further retry
    pub initial_backoff: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Log raw response bodies
    pub debug: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            summary_url: DEFAULT_SUMMARY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: 1,
            initial_backoff: Duration::from_millis(500),
            user_agent: format!("pubmed-fetcher/{}", env!("CARGO_PKG_VERSION")),
            debug: false,
        }
    }
}

impl FetcherConfig {
    /// Point both endpoints at `base`, keeping the E-utilities file names.
    ///
    /// Used to aim the client at a local mock server.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            search_url: format!("{}/esearch.fcgi", base),
            summary_url: format!("{}/esummary.fcgi", base),
            ..Self::default()
        }
    }

    /// Check that the configuration can be used to build a client.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("search_url", &self.search_url), ("summary_url", &self.summary_url)] {
            let parsed = Url::parse(value)
                .map_err(|e| FetcherError::Config(format!("Invalid {} '{}': {}", name, value, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(FetcherError::Config(format!(
                    "{} must use http or https, got '{}'",
                    name,
                    parsed.scheme()
                )));
            }
        }

        if self.max_retries > MAX_RETRIES {
            return Err(FetcherError::Config(format!(
                "max_retries must be at most {}, got {}",
                MAX_RETRIES, self.max_retries
            )));
        }

        if self.timeout.is_zero() {
            return Err(FetcherError::Config("timeout must be greater than zero".to_string()));
        }

        Ok(())
    }
}
