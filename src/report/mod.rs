//! Report model and generation.

pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report};

use crate::analysis::{LabelFrequency, ProbabilityTable};
use crate::models::{DatasetOverview, Finding, ReportMetadata};
use serde::Serialize;
use std::collections::BTreeMap;

/// The complete analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// Dataset summary.
    pub overview: DatasetOverview,
    /// Pairwise co-occurrence matrix, indexed by the metadata label order.
    pub cooccurrence: Vec<Vec<u64>>,
    /// Pearson correlation matrix, same indexing.
    pub correlation: Vec<Vec<f64>>,
    /// Conditional-probability estimates.
    pub probabilities: ProbabilityTable,
    /// Per-assignment label frequency.
    pub frequency: BTreeMap<String, LabelFrequency>,
    /// Grade-label correlation, when grades are present in the data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_correlation: Option<BTreeMap<String, f64>>,
    /// Ordered insight findings.
    pub findings: Vec<Finding>,
}
