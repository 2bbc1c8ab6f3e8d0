//! Data models for the peer-review analyzer.
//!
//! This module contains the core data structures used throughout the
//! application: review records, canonical label keys, findings, and the
//! report model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single reviewed-assignment unit.
///
/// Immutable once loaded; the aggregation core only ever borrows records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Quality labels applied to this review (e.g. "relevance").
    #[serde(default)]
    pub labels: BTreeSet<String>,
    /// Reviewer identifier (student number), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    /// Author of the reviewed assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Assignment group this review belongs to (e.g. "HW1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment: Option<String>,
    /// Reviewer's course grade, when the grade sheet has been joined in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
}

impl ReviewRecord {
    /// Returns true if the record carries the given label.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Build a record carrying only the given labels.
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Canonical unordered pair of labels.
///
/// Members are sorted on construction, so pairs built on different code
/// paths always compare equal regardless of argument order. The `→`-joined
/// rendering lives only in `Display`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelPair {
    first: String,
    second: String,
}

impl LabelPair {
    /// Create a pair; argument order is irrelevant.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Returns true if the pair contains the given label.
    pub fn contains(&self, label: &str) -> bool {
        self.first == label || self.second == label
    }
}

impl fmt::Display for LabelPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.first, self.second)
    }
}

impl Serialize for LabelPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Canonical unordered triple of labels, sorted on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelTriple {
    labels: [String; 3],
}

impl LabelTriple {
    /// Create a triple; argument order is irrelevant.
    pub fn new(a: impl Into<String>, b: impl Into<String>, c: impl Into<String>) -> Self {
        let mut labels = [a.into(), b.into(), c.into()];
        labels.sort();
        Self { labels }
    }
}

impl fmt::Display for LabelTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}→{}", self.labels[0], self.labels[1], self.labels[2])
    }
}

impl Serialize for LabelTriple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A conditional-probability key: sorted antecedent labels and a target.
///
/// Rendered as `a→c` for a single condition and `a+b→c` for a double
/// condition, matching how the original tool named its chart series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Condition {
    antecedents: Vec<String>,
    target: String,
}

impl Condition {
    /// P(target | antecedent).
    pub fn single(antecedent: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            antecedents: vec![antecedent.into()],
            target: target.into(),
        }
    }

    /// P(target | a ∧ b). Antecedents are sorted on construction.
    pub fn pair(a: impl Into<String>, b: impl Into<String>, target: impl Into<String>) -> Self {
        let mut antecedents = vec![a.into(), b.into()];
        antecedents.sort();
        Self {
            antecedents,
            target: target.into(),
        }
    }

    /// The labels the probability is conditioned on, in sorted order.
    pub fn antecedents(&self) -> &[String] {
        &self.antecedents
    }

    /// The label whose probability is estimated.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.antecedents.join("+"), self.target)
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Kind of textual finding produced by the insight generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// The double condition outperforms the best single condition.
    PositiveCorrelation,
    /// One single condition is a markedly stronger predictor than the other.
    DifferentialImpact,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::PositiveCorrelation => write!(f, "positive correlation"),
            FindingKind::DifferentialImpact => write!(f, "differential impact"),
        }
    }
}

/// Strength tier of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
    Informative,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Strong => write!(f, "strong"),
            Strength::Moderate => write!(f, "moderate"),
            Strength::Weak => write!(f, "weak"),
            Strength::Informative => write!(f, "informative"),
        }
    }
}

/// One human-readable finding derived from the probability estimates.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub message: String,
    pub strength: Strength,
}

/// Compact summary of a loaded dataset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatasetOverview {
    /// Total number of review records.
    pub total_records: usize,
    /// Number of distinct reviewers seen.
    pub reviewers: usize,
    /// Number of distinct assignment groups seen.
    pub assignments: usize,
    /// Records carrying each universe label.
    pub label_counts: BTreeMap<String, u64>,
    /// Records per assignment group.
    pub records_per_assignment: BTreeMap<String, usize>,
}

impl DatasetOverview {
    /// Summarize a record slice against a label universe.
    pub fn from_records(records: &[ReviewRecord], labels: &[String]) -> Self {
        let mut overview = Self {
            total_records: records.len(),
            ..Self::default()
        };

        for label in labels {
            overview.label_counts.insert(label.clone(), 0);
        }

        let mut reviewers: BTreeSet<&str> = BTreeSet::new();

        for record in records {
            if let Some(ref id) = record.student_id {
                reviewers.insert(id);
            }
            if let Some(ref assignment) = record.assignment {
                *overview
                    .records_per_assignment
                    .entry(assignment.clone())
                    .or_insert(0) += 1;
            }
            for label in labels {
                if record.has_label(label) {
                    *overview.label_counts.entry(label.clone()).or_insert(0) += 1;
                }
            }
        }

        overview.reviewers = reviewers.len();
        overview.assignments = overview.records_per_assignment.len();
        overview
    }
}

/// Metadata about an analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Path the dataset was loaded from.
    pub source: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Label universe, in analysis order.
    pub labels: Vec<String>,
    /// Number of records analyzed.
    pub records_analyzed: usize,
    /// Duration of the analysis in seconds.
    pub duration_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_pair_canonical_order() {
        let a = LabelPair::new("relevance", "constructive");
        let b = LabelPair::new("constructive", "relevance");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "constructive→relevance");
    }

    #[test]
    fn test_label_triple_canonical_order() {
        let a = LabelTriple::new("relevance", "concreteness", "constructive");
        let b = LabelTriple::new("constructive", "relevance", "concreteness");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "concreteness→constructive→relevance");
    }

    #[test]
    fn test_condition_display() {
        let single = Condition::single("relevance", "constructive");
        assert_eq!(single.to_string(), "relevance→constructive");

        let double = Condition::pair("relevance", "concreteness", "constructive");
        assert_eq!(double.to_string(), "concreteness+relevance→constructive");
        assert_eq!(double.antecedents(), ["concreteness", "relevance"]);
    }

    #[test]
    fn test_record_labels() {
        let record = ReviewRecord::with_labels(["relevance", "constructive"]);
        assert!(record.has_label("relevance"));
        assert!(!record.has_label("concreteness"));
    }

    #[test]
    fn test_dataset_overview() {
        let labels = vec!["relevance".to_string(), "constructive".to_string()];
        let mut first = ReviewRecord::with_labels(["relevance"]);
        first.student_id = Some("D1051683".to_string());
        first.assignment = Some("HW1".to_string());

        let mut second = ReviewRecord::with_labels(["relevance", "constructive"]);
        second.student_id = Some("D1051683".to_string());
        second.assignment = Some("HW2".to_string());

        let overview = DatasetOverview::from_records(&[first, second], &labels);
        assert_eq!(overview.total_records, 2);
        assert_eq!(overview.reviewers, 1);
        assert_eq!(overview.assignments, 2);
        assert_eq!(overview.label_counts.get("relevance"), Some(&2));
        assert_eq!(overview.label_counts.get("constructive"), Some(&1));
        assert_eq!(overview.records_per_assignment.get("HW1"), Some(&1));
    }
}
