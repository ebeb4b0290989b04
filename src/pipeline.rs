//! Search, fetch summaries, project.

use crate::error::Result;
use crate::projector::{project_all, ProjectedRecord};
use crate::pubmed::PubmedClient;
use tracing::info;

/// Run a query end to end and return rows in search relevance order.
///
/// No summary request is sent when the search finds nothing.
pub async fn fetch_records(
    client: &PubmedClient,
    query: &str,
    max_results: u32,
) -> Result<Vec<ProjectedRecord>> {
    let ids = client.search(query, max_results).await?;
    if ids.is_empty() {
        info!(query = query, "No matching papers");
        return Ok(Vec::new());
    }

    let records = client.summaries(&ids).await?;
    Ok(project_all(&ids, &records))
}
