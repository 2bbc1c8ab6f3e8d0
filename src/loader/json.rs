//! JSON dataset parsing.
//!
//! Two shapes are accepted: a flat array of review records, and the nested
//! per-assignment export the original dashboard consumed (assignment name →
//! reviewed assignments → rounds carrying 0/1 label flags and a feedback
//! text). Rounds without feedback are unreviewed slots and are skipped.

use super::{clean_name, LoaderError};
use crate::models::ReviewRecord;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDataset {
    Flat(Vec<ReviewRecord>),
    Nested(BTreeMap<String, Vec<RawAssignment>>),
}

#[derive(Debug, Deserialize)]
struct RawAssignment {
    #[serde(rename = "Reviewer_Name", default)]
    reviewer: Option<String>,
    #[serde(rename = "Author_Name", default)]
    author: Option<String>,
    #[serde(rename = "Round", default)]
    rounds: Vec<RawRound>,
}

#[derive(Debug, Deserialize)]
struct RawRound {
    #[serde(rename = "Relevance", default)]
    relevance: Option<Value>,
    #[serde(rename = "Concreteness", default)]
    concreteness: Option<Value>,
    #[serde(rename = "Constructive", default)]
    constructive: Option<Value>,
    #[serde(rename = "Feedback", default)]
    feedback: Option<String>,
}

/// The export writes label flags as 1/0 numbers, but booleans and "1"
/// strings appear in older files.
fn flag_set(value: &Option<Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim() == "1",
        _ => false,
    }
}

fn has_feedback(round: &RawRound) -> bool {
    round
        .feedback
        .as_deref()
        .map(|f| {
            let trimmed = f.trim();
            !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("null")
        })
        .unwrap_or(false)
}

/// Parse either accepted JSON shape into flat review records.
pub fn parse_json(content: &str) -> Result<Vec<ReviewRecord>, serde_json::Error> {
    let raw: RawDataset = serde_json::from_str(content)?;

    let records = match raw {
        RawDataset::Flat(records) => records,
        RawDataset::Nested(assignments) => flatten_nested(assignments),
    };

    Ok(records)
}

fn flatten_nested(assignments: BTreeMap<String, Vec<RawAssignment>>) -> Vec<ReviewRecord> {
    let mut records = Vec::new();

    for (assignment_name, reviewed) in assignments {
        for entry in reviewed {
            let reviewer = clean_name(entry.reviewer);
            let author = clean_name(entry.author);

            for round in entry.rounds {
                if !has_feedback(&round) {
                    continue;
                }

                let mut labels = BTreeSet::new();
                if flag_set(&round.relevance) {
                    labels.insert("relevance".to_string());
                }
                if flag_set(&round.concreteness) {
                    labels.insert("concreteness".to_string());
                }
                if flag_set(&round.constructive) {
                    labels.insert("constructive".to_string());
                }

                records.push(ReviewRecord {
                    labels,
                    student_id: reviewer.clone(),
                    author: author.clone(),
                    assignment: Some(assignment_name.clone()),
                    grade: None,
                });
            }
        }
    }

    records
}

/// Load a JSON dataset file.
pub fn load_json_file(path: &Path) -> Result<Vec<ReviewRecord>, LoaderError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_json(&content).map_err(|source| LoaderError::Json {
        path: path.to_path_buf(),
        source,
    })
}
