//! CSV and console output for projected records.

use crate::error::Result;
use crate::projector::{ProjectedRecord, COLUMNS};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write records as CSV to `writer`: header row, then one row per record.
///
/// The header is written even when `records` is empty.
pub fn write_csv<W: Write>(writer: W, records: &[ProjectedRecord]) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(records.len())
}

/// Save records to a CSV file, replacing any existing file.
pub fn save_csv(path: &Path, records: &[ProjectedRecord]) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    let written = write_csv(file, records)?;
    info!(path = %path.display(), count = written, "Saved CSV");
    Ok(written)
}

/// Write one line per record in `ProjectedRecord`'s display form.
pub fn write_console<W: Write>(mut writer: W, records: &[ProjectedRecord]) -> Result<usize> {
    for record in records {
        writeln!(writer, "{}", record)?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Export to `path` when given, otherwise print to stdout.
pub fn export(records: &[ProjectedRecord], path: Option<&Path>) -> Result<usize> {
    match path {
        Some(path) => save_csv(path, records),
        None => write_console(std::io::stdout().lock(), records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample() -> Vec<ProjectedRecord> {
        vec![
            ProjectedRecord {
                pubmed_id: "38000001".to_string(),
                title: "Antibody screening, at scale".to_string(),
                publication_date: "2024 Feb 1".to_string(),
                non_academic_authors: "Doe J, Roe R".to_string(),
                company_affiliations: "Acme Pharma".to_string(),
                corresponding_author_email: "doe@acme.com".to_string(),
            },
            ProjectedRecord {
                pubmed_id: "38000002".to_string(),
                title: "Protein folding".to_string(),
                publication_date: "2023".to_string(),
                ..ProjectedRecord::default()
            },
        ]
    }

    #[test]
    fn test_save_csv_layout() -> Result<()> {
        let temp = NamedTempFile::new()?;
        std::fs::write(temp.path(), "stale content\nmore\nand more\nand more\n")?;

        let written = save_csv(temp.path(), &sample())?;
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(temp.path())?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "PubmedID,Title,PublicationDate,NonAcademicAuthors,CompanyAffiliations,CorrespondingAuthorEmail"
        );

        let mut reader = csv::Reader::from_path(temp.path())?;
        let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Antibody screening, at scale");
        assert_eq!(&rows[0][2], "2024 Feb 1");
        assert_eq!(&rows[0][5], "doe@acme.com");
        assert_eq!(&rows[1][1], "Protein folding");
        assert_eq!(&rows[1][5], "");
        Ok(())
    }

    #[test]
    fn test_empty_export_has_header() -> Result<()> {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&mut buf, &[])?, 0);
        let text = String::from_utf8_lossy(&buf);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("PubmedID,"));
        Ok(())
    }

    #[test]
    fn test_console_lines() -> Result<()> {
        let mut buf = Vec::new();
        assert_eq!(write_console(&mut buf, &sample())?, 2);
        let text = String::from_utf8_lossy(&buf);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("38000001 | Antibody screening, at scale | "));
        Ok(())
    }
}
