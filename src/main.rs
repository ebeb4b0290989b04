//! pubmed-fetcher - list non-academic authors of PubMed papers
//!
//! ## Usage
//!
//! ```bash
//! pubmed-fetcher -q "cancer immunotherapy" -c 20 -f papers.csv
//! pubmed-fetcher -q "cancer immunotherapy" --debug
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pubmed_fetcher::config::{
    FetcherConfig, DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_URL, DEFAULT_SUMMARY_URL,
    DEFAULT_TIMEOUT_SECS, MAX_RESULTS, MAX_RETRIES,
};
use pubmed_fetcher::{export, pipeline, pubmed::PubmedClient, FetcherError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Fetch papers from the PubMed API and save them to CSV.
#[derive(Parser)]
#[command(name = "pubmed-fetcher")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print debug information during execution
    #[arg(short, long)]
    debug: bool,

    /// PubMed search query
    #[arg(short, long)]
    query: String,

    /// Number of papers to fetch
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MAX_RESULTS,
        value_parser = clap::value_parser!(u32).range(1..=(MAX_RESULTS as i64))
    )]
    count: u32,

    /// Output CSV file (prints to the console when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// esearch endpoint
    #[arg(long, default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// esummary endpoint
    #[arg(long, default_value = DEFAULT_SUMMARY_URL)]
    summary_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Retries for transient HTTP failures
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(0..=(MAX_RETRIES as i64))
    )]
    retries: u32,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// User-facing text for a failed run. HTTP failures anywhere in the chain
/// are reported as network errors.
fn error_message(e: &anyhow::Error) -> String {
    let network = e
        .chain()
        .find_map(|cause| cause.downcast_ref::<FetcherError>())
        .is_some_and(FetcherError::is_network);

    if network {
        format!("Network error: {:#}", e)
    } else {
        format!("Error: {:#}", e)
    }
}

fn init_logging(debug: bool, json: bool) {
    let log_level = if debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = FetcherConfig {
        search_url: cli.search_url,
        summary_url: cli.summary_url,
        timeout: Duration::from_secs(cli.timeout),
        max_retries: cli.retries,
        debug: cli.debug,
        ..FetcherConfig::default()
    };

    let client = PubmedClient::new(config).context("Failed to set up PubMed client")?;

    let records = pipeline::fetch_records(&client, &cli.query, cli.count).await?;

    let path = cli.file.as_deref();
    let written = export::export(&records, path).with_context(|| match path {
        Some(p) => format!("Failed to write {}", p.display()),
        None => "Failed to print results".to_string(),
    })?;

    match path {
        Some(p) => println!("Saved {} papers to {}", written, p.display()),
        None => println!("Printed {} papers", written),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["pubmed-fetcher", "-q", "cancer"]).expect("parse");
        assert_eq!(cli.query, "cancer");
        assert_eq!(cli.count, 10);
        assert!(cli.file.is_none());
        assert!(!cli.debug);
        assert_eq!(cli.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.retries, 1);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::try_parse_from([
            "pubmed-fetcher", "-d", "-q", "gene therapy", "-c", "5", "-f", "out.csv",
        ])
        .expect("parse");
        assert!(cli.debug);
        assert_eq!(cli.count, 5);
        assert_eq!(cli.file, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["pubmed-fetcher"]).is_err());
        assert!(Cli::try_parse_from(["pubmed-fetcher", "-q", "x", "-c", "0"]).is_err());
        assert!(Cli::try_parse_from(["pubmed-fetcher", "-q", "x", "--timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["pubmed-fetcher", "-q", "x", "-c", "201"]).is_err());
        assert!(Cli::try_parse_from(["pubmed-fetcher", "-q", "x", "--retries", "6"]).is_err());
        assert!(Cli::try_parse_from(["pubmed-fetcher", "-q", "x", "-c", "200", "--retries", "5"]).is_ok());
    }

    #[test]
    fn test_error_message_network_class() {
        let api = anyhow::Error::new(FetcherError::Api {
            code: 503,
            message: "E-utilities error: 503 Service Unavailable".to_string(),
        });
        assert_eq!(
            error_message(&api),
            "Network error: API error: 503 - E-utilities error: 503 Service Unavailable"
        );

        let transport = reqwest::Client::new()
            .get("not a url")
            .build()
            .expect_err("invalid url");
        let network = anyhow::Error::new(FetcherError::Network(transport));
        assert!(error_message(&network).starts_with("Network error: HTTP request failed: "));

        let wrapped = anyhow::Error::new(FetcherError::Api {
            code: 404,
            message: "not found".to_string(),
        })
        .context("Search failed");
        assert_eq!(
            error_message(&wrapped),
            "Network error: Search failed: API error: 404 - not found"
        );
    }

    #[test]
    fn test_error_message_other_errors() {
        let config = anyhow::Error::new(FetcherError::Config("timeout must be greater than zero".to_string()))
            .context("Failed to set up PubMed client");
        assert_eq!(
            error_message(&config),
            "Error: Failed to set up PubMed client: Config error: timeout must be greater than zero"
        );

        let validation = anyhow::Error::new(FetcherError::Validation("query must not be empty".to_string()));
        assert_eq!(
            error_message(&validation),
            "Error: Validation error: query must not be empty"
        );

        let plain = anyhow::anyhow!("disk full");
        assert_eq!(error_message(&plain), "Error: disk full");
    }

    #[tokio::test]
    async fn test_run_reports_refused_connection_as_network() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("bind local port")
            .port();
        let base = format!("http://127.0.0.1:{}", port);
        let cli = Cli::try_parse_from([
            "pubmed-fetcher".to_string(),
            "-q".to_string(),
            "cancer".to_string(),
            "--retries".to_string(),
            "0".to_string(),
            "--search-url".to_string(),
            format!("{}/esearch.fcgi", base),
            "--summary-url".to_string(),
            format!("{}/esummary.fcgi", base),
        ])
        .expect("parse");

        let err = run(cli).await.expect_err("nothing is listening");
        assert!(error_message(&err).starts_with("Network error: "));
    }
}
