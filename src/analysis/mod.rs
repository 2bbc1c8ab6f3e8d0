//! Statistical aggregation core.
//!
//! Pure, synchronous computation over fully-loaded records: binary label
//! vectors, co-occurrence counts, conditional probabilities, Pearson
//! correlation, and textual findings. No module carries residual state, so
//! every function here is safe to call repeatedly with different inputs.

pub mod cooccurrence;
pub mod correlation;
pub mod frequency;
pub mod insights;
pub mod probability;
pub mod vectors;

pub use cooccurrence::{count_cooccurrence, CooccurrenceCounts};
pub use correlation::{build_correlation_matrix, grade_label_correlation, pearson};
pub use frequency::{label_frequency, LabelFrequency};
pub use insights::{generate_insights, InsightThresholds};
pub use probability::{estimate_conditional_probabilities, ProbabilityTable};
pub use vectors::build_label_vectors;

use crate::models::{Finding, ReviewRecord};

/// Everything the core derives from one record slice and label universe.
#[derive(Debug, Clone)]
pub struct LabelAnalysis {
    /// Single, pairwise, and triple co-occurrence counts.
    pub counts: CooccurrenceCounts,
    /// Full symmetric Pearson correlation matrix, indexed by universe order.
    pub correlation: Vec<Vec<f64>>,
    /// Conditional-probability estimates.
    pub probabilities: ProbabilityTable,
    /// Ordered findings for the canonical triple; empty for other universes.
    pub findings: Vec<Finding>,
}

/// Run the full aggregation pipeline: vectors and counts, then
/// probabilities and correlations, then findings.
pub fn analyze(
    records: &[ReviewRecord],
    labels: &[String],
    thresholds: &InsightThresholds,
) -> LabelAnalysis {
    let vectors = build_label_vectors(records, labels);
    let counts = count_cooccurrence(records, labels);
    let correlation = build_correlation_matrix(&vectors, labels);
    let probabilities = estimate_conditional_probabilities(&counts);

    let findings = probabilities
        .triple
        .as_ref()
        .map(|triple| generate_insights(triple, thresholds))
        .unwrap_or_default();

    LabelAnalysis {
        counts,
        correlation,
        probabilities,
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> Vec<String> {
        vec![
            "relevance".to_string(),
            "concreteness".to_string(),
            "constructive".to_string(),
        ]
    }

    #[test]
    fn test_analyze_end_to_end() {
        let records = vec![
            ReviewRecord::with_labels(["relevance", "concreteness", "constructive"]),
            ReviewRecord::with_labels(["relevance", "constructive"]),
            ReviewRecord::with_labels(["relevance"]),
            ReviewRecord::with_labels(["concreteness"]),
        ];

        let analysis = analyze(&records, &universe(), &InsightThresholds::default());

        assert_eq!(analysis.counts.single_count("relevance"), 3);
        assert_eq!(analysis.counts.triple_count(
            "relevance",
            "concreteness",
            "constructive"
        ), 1);
        assert_eq!(analysis.correlation.len(), 3);
        assert!(analysis.probabilities.triple.is_some());
    }

    #[test]
    fn test_analyze_empty_input_is_degenerate_not_error() {
        let analysis = analyze(&[], &universe(), &InsightThresholds::default());

        assert!(analysis.counts.matrix.iter().flatten().all(|&v| v == 0));
        for (i, row) in analysis.correlation.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(*value, expected);
            }
        }
        assert!(analysis.findings.is_empty());
    }

    #[test]
    fn test_two_label_universe_has_no_triple_findings() {
        let labels = vec!["relevance".to_string(), "constructive".to_string()];
        let records = vec![ReviewRecord::with_labels(["relevance", "constructive"])];

        let analysis = analyze(&records, &labels, &InsightThresholds::default());
        assert!(analysis.probabilities.triple.is_none());
        assert!(analysis.findings.is_empty());
    }
}
