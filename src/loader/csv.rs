//! CSV dataset parsing.
//!
//! One row per review round, with the exporter's column names
//! (`Reviewer_Name`, `Assignment`, 0/1 label columns, `Feedback`, optional
//! `Grade`). Rows with blank feedback are unreviewed slots and are skipped;
//! rows that fail to deserialize are skipped with a debug log so one bad
//! line cannot abort the whole load.

use super::{clean_name, LoaderError};
use crate::models::ReviewRecord;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Reviewer_Name", alias = "reviewer", default)]
    reviewer: Option<String>,
    #[serde(rename = "Author_Name", alias = "author", default)]
    author: Option<String>,
    #[serde(rename = "Assignment", alias = "assignment", default)]
    assignment: Option<String>,
    #[serde(rename = "Relevance", alias = "relevance", default)]
    relevance: Option<u8>,
    #[serde(rename = "Concreteness", alias = "concreteness", default)]
    concreteness: Option<u8>,
    #[serde(rename = "Constructive", alias = "constructive", default)]
    constructive: Option<u8>,
    #[serde(rename = "Grade", alias = "grade", default)]
    grade: Option<f64>,
    #[serde(rename = "Feedback", alias = "feedback", default)]
    feedback: Option<String>,
}

impl CsvRow {
    fn has_feedback(&self) -> bool {
        self.feedback
            .as_deref()
            .map(|f| {
                let trimmed = f.trim();
                !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("null")
            })
            .unwrap_or(false)
    }

    fn into_record(self) -> ReviewRecord {
        let mut labels = BTreeSet::new();
        if self.relevance == Some(1) {
            labels.insert("relevance".to_string());
        }
        if self.concreteness == Some(1) {
            labels.insert("concreteness".to_string());
        }
        if self.constructive == Some(1) {
            labels.insert("constructive".to_string());
        }

        ReviewRecord {
            labels,
            student_id: clean_name(self.reviewer),
            author: clean_name(self.author),
            assignment: clean_name(self.assignment),
            grade: self.grade,
        }
    }
}

/// Parse CSV content into review records.
pub fn parse_csv(content: &str) -> Vec<ReviewRecord> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();

    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        match row {
            Ok(row) if row.has_feedback() => records.push(row.into_record()),
            Ok(_) => {
                debug!("Skipping row {}: no feedback", index + 1);
            }
            Err(e) => {
                debug!("Skipping malformed row {}: {}", index + 1, e);
            }
        }
    }

    records
}

/// Load a CSV dataset file.
pub fn load_csv_file(path: &Path) -> Result<Vec<ReviewRecord>, LoaderError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_csv(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let content = "\
Reviewer_Name,Author_Name,Assignment,Relevance,Concreteness,Constructive,Grade,Feedback
D1051683,D1051234,HW1,1,0,1,88.5,clear and actionable
D1051683,D1051234,HW1,1,1,1,88.5,
D1051999,NULL,HW2,0,1,0,,add an example
";

        let records = parse_csv(content);
        // Blank-feedback row skipped.
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].student_id.as_deref(), Some("D1051683"));
        assert!(records[0].has_label("relevance"));
        assert!(!records[0].has_label("concreteness"));
        assert_eq!(records[0].grade, Some(88.5));

        assert_eq!(records[1].author, None);
        assert_eq!(records[1].assignment.as_deref(), Some("HW2"));
        assert_eq!(records[1].grade, None);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let content = "\
Reviewer_Name,Author_Name,Assignment,Relevance,Concreteness,Constructive,Grade,Feedback
D1051683,D1051234,HW1,not-a-number,0,1,,still counted?
D1051684,D1051234,HW1,1,0,1,,fine
";

        let records = parse_csv(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].student_id.as_deref(), Some("D1051684"));
    }

    #[test]
    fn test_lowercase_headers_accepted() {
        let content = "\
reviewer,author,assignment,relevance,concreteness,constructive,grade,feedback
D1051683,D1051234,HW1,1,1,0,90,solid reasoning
";

        let records = parse_csv(content);
        assert_eq!(records.len(), 1);
        assert!(records[0].has_label("concreteness"));
        assert_eq!(records[0].grade, Some(90.0));
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_csv("").is_empty());
    }
}
