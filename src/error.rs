//! Custom error types for pubmed-fetcher.
//!
//! All library functions return `Result<T, FetcherError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for pubmed-fetcher operations.
#[derive(Debug, Error)]
pub enum FetcherError {
    /// Transport-level HTTP failure (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status or reported an error in the body
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code (0 when the error came from the response body)
        code: u16,
        /// Error message
        message: String,
    },

    /// Response body did not have the expected top-level shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A requested PubMed ID was absent from the summary response
    #[error("Record {0} missing from summary response")]
    MissingRecord(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl FetcherError {
    /// Whether this error belongs to the user-facing "network error" class.
    pub fn is_network(&self) -> bool {
        matches!(self, FetcherError::Network(_) | FetcherError::Api { .. })
    }

    /// Whether a failed request is worth sending again.
    ///
    /// Transport errors, 5xx and 429 are transient; everything else is final.
    pub fn is_transient(&self) -> bool {
        match self {
            FetcherError::Network(e) => !e.is_builder() && !e.is_decode(),
            FetcherError::Api { code, .. } => *code == 429 || (500u16..600).contains(code),
            _ => false,
        }
    }
}

/// Result type alias using `FetcherError`
pub type Result<T> = std::result::Result<T, FetcherError>;
