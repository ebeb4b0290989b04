//! Projection of raw summary records into the six-column output row.

use crate::classifier::classify;
use crate::error::FetcherError;
use crate::record::{Author, RawRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Output column names, in order
pub const COLUMNS: &[&str] = &[
    "PubmedID",
    "Title",
    "PublicationDate",
    "NonAcademicAuthors",
    "CompanyAffiliations",
    "CorrespondingAuthorEmail",
];

/// One output row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectedRecord {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "PublicationDate")]
    pub publication_date: String,
    /// Non-academic author names joined with ", "
    #[serde(rename = "NonAcademicAuthors")]
    pub non_academic_authors: String,
    /// Non-academic affiliations joined with ", "
    #[serde(rename = "CompanyAffiliations")]
    pub company_affiliations: String,
    #[serde(rename = "CorrespondingAuthorEmail")]
    pub corresponding_author_email: String,
}

impl fmt::Display for ProjectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {} | {}",
            self.pubmed_id,
            self.title,
            self.publication_date,
            self.non_academic_authors,
            self.company_affiliations,
            self.corresponding_author_email
        )
    }
}

/// Project a single record.
pub fn project(pubmed_id: &str, record: &RawRecord) -> ProjectedRecord {
    let non_academic_authors = record
        .authors
        .iter()
        .filter(|a| is_non_academic_author(a))
        .filter_map(|a| a.name.as_deref())
        .collect::<Vec<_>>()
        .join(", ");

    let company_affiliations = record
        .affiliations
        .iter()
        .map(String::as_str)
        .filter(|aff| !classify(aff).is_academic())
        .collect::<Vec<_>>()
        .join(", ");

    ProjectedRecord {
        pubmed_id: pubmed_id.to_string(),
        title: record.title.clone().unwrap_or_default(),
        publication_date: record.pub_date.clone().unwrap_or_default(),
        non_academic_authors,
        company_affiliations,
        corresponding_author_email: record.corresponding_author_email.clone().unwrap_or_default(),
    }
}

/// Project every ID in order. IDs without a record are skipped.
pub fn project_all(ids: &[String], records: &HashMap<String, RawRecord>) -> Vec<ProjectedRecord> {
    let projected: Vec<ProjectedRecord> = ids
        .iter()
        .filter_map(|id| match records.get(id) {
            Some(record) => Some(project(id, record)),
            None => {
                warn!(error = %FetcherError::MissingRecord(id.clone()), "Skipping record");
                None
            }
        })
        .collect();

    debug!(requested = ids.len(), projected = projected.len(), "Projection complete");
    projected
}

/// An author is judged by affiliation when there is one, otherwise by name.
/// Authors without a name never make it into the output.
fn is_non_academic_author(author: &Author) -> bool {
    match (&author.affiliation, &author.name) {
        (_, None) => false,
        (Some(affiliation), Some(_)) => !classify(affiliation).is_academic(),
        (None, Some(name)) => !classify(name).is_academic(),
    }
}
