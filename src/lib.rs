//! # pubmed-fetcher
//!
//! Fetch PubMed papers for a query and report the authors and affiliations
//! that look non-academic.
//!
//! ## Modules
//!
//! - [`pubmed`] - E-utilities client (esearch + esummary)
//! - [`record`] - Lenient typed view of summary records
//! - [`classifier`] - Academic vs. non-academic keyword heuristic
//! - [`projector`] - Six-column output rows
//! - [`export`] - CSV file or console output
//! - [`pipeline`] - Search, fetch, project in one call
//! - [`config`] - Client configuration
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pubmed_fetcher::{config::FetcherConfig, pipeline, pubmed::PubmedClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PubmedClient::new(FetcherConfig::default())?;
//!     let records = pipeline::fetch_records(&client, "crispr therapy", 10).await?;
//!     println!("Found {} records", records.len());
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod projector;
pub mod pubmed;
pub mod record;

pub use error::{FetcherError, Result};
