//! PubMed E-utilities client.
//!
//! Two calls are used:
//! - `esearch.fcgi` turns a query into an ordered list of PubMed IDs
//! - `esummary.fcgi` returns one summary record per requested ID
//!
//! Requests are sent one at a time. Transient failures (transport errors,
//! HTTP 5xx and 429) are retried with exponential backoff up to
//! `FetcherConfig::max_retries` times.

use crate::config::{FetcherConfig, MAX_RESULTS};
use crate::error::{FetcherError, Result};
use crate::record::RawRecord;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// E-utilities client with timeout and retry policy from [`FetcherConfig`]
pub struct PubmedClient {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl PubmedClient {
    /// Create a new client. The configuration is validated first.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetcherError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Search PubMed and return up to `max_results` IDs in relevance order.
    ///
    /// A response without `esearchresult.idlist` yields an empty list.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            return Err(FetcherError::Validation("query must not be empty".to_string()));
        }
        if max_results == 0 || max_results > MAX_RESULTS {
            return Err(FetcherError::Validation(format!(
                "max_results must be between 1 and {}, got {}",
                MAX_RESULTS, max_results
            )));
        }

        info!(query = query, max_results = max_results, "Searching PubMed");

        let retmax = max_results.to_string();
        let body = self
            .get_json(
                &self.config.search_url,
                &[
                    ("db", "pubmed"),
                    ("term", query),
                    ("retmax", retmax.as_str()),
                    ("retmode", "json"),
                ],
            )
            .await?;

        let ids = parse_search_response(&body, max_results as usize);
        info!(count = ids.len(), "Search complete");
        Ok(ids)
    }

    /// Fetch summary records for `ids` in a single request.
    ///
    /// IDs that upstream does not return are simply absent from the map.
    pub async fn summaries(&self, ids: &[String]) -> Result<HashMap<String, RawRecord>> {
        if ids.is_empty() {
            return Err(FetcherError::Validation(
                "at least one PubMed ID is required for a summary request".to_string(),
            ));
        }

        info!(count = ids.len(), "Fetching PubMed summaries");

        let joined = ids.join(",");
        let body = self
            .get_json(
                &self.config.summary_url,
                &[("db", "pubmed"), ("id", joined.as_str()), ("retmode", "json")],
            )
            .await?;

        let records = parse_summary_response(&body)?;
        info!(requested = ids.len(), returned = records.len(), "Summaries fetched");
        Ok(records)
    }

    /// GET `url` and parse the body as JSON, retrying transient failures.
    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value> {
        let mut backoff = self.config.initial_backoff;
        let mut attempt = 0;

        loop {
            match self.get_json_once(url, params).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        url = url,
                        attempt = attempt,
                        wait_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_json_once(&self, url: &str, params: &[(&str, &str)]) -> Result<Value> {
        debug!(url = url, params = ?params, "GET");

        let response = self.client.get(url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FetcherError::Api {
                code: status.as_u16(),
                message: format!("E-utilities error: {} {}", status, error_text.trim()),
            });
        }

        let text = response.text().await?;
        if self.config.debug {
            debug!(url = url, body = %text, "Raw response");
        }

        serde_json::from_str(&text).map_err(|e| {
            FetcherError::MalformedResponse(format!("Invalid JSON from {}: {}", url, e))
        })
    }
}

/// Extract `esearchresult.idlist`, keeping string entries only.
fn parse_search_response(body: &Value, limit: usize) -> Vec<String> {
    let Some(result) = body.get("esearchresult") else {
        warn!("Search response has no esearchresult, treating as no matches");
        return Vec::new();
    };

    if let Some(err) = result.get("ERROR").and_then(Value::as_str) {
        warn!(error = err, "esearch reported an error");
    }

    let Some(list) = result.get("idlist").and_then(Value::as_array) else {
        warn!("Search response has no idlist, treating as no matches");
        return Vec::new();
    };

    list.iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .take(limit)
        .collect()
}

/// Build the ID -> record map from `result`.
///
/// `result.uids` is bookkeeping, and entries carrying their own `error`
/// (e.g. an unknown ID) are dropped so they count as missing.
fn parse_summary_response(body: &Value) -> Result<HashMap<String, RawRecord>> {
    if let Some(err) = body.get("error").and_then(Value::as_str) {
        return Err(FetcherError::Api {
            code: 0,
            message: format!("esummary reported an error: {}", err),
        });
    }

    let Some(result) = body.get("result").and_then(Value::as_object) else {
        warn!("Summary response has no result object, treating as empty");
        return Ok(HashMap::new());
    };

    let mut records = HashMap::with_capacity(result.len());
    for (id, entry) in result.iter().filter(|(id, _)| id.as_str() != "uids") {
        if let Some(err) = entry.get("error").and_then(Value::as_str) {
            warn!(id = id.as_str(), error = err, "Summary entry reported an error");
            continue;
        }
        let record: RawRecord = serde_json::from_value(entry.clone())?;
        records.insert(id.clone(), record);
    }

    Ok(records)
}
