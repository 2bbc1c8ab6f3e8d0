//! Textual findings derived from the conditional-probability estimates.
//!
//! Compares the double-condition probability against the single-condition
//! ones for the canonical triple and emits ordered findings.

use crate::analysis::probability::TripleProbabilities;
use crate::models::{Finding, FindingKind, Strength};

/// Thresholds governing when findings are emitted and how they are tiered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightThresholds {
    /// Minimum absolute gap between the two single-condition probabilities
    /// before a differential-impact finding is emitted.
    pub differential: f64,
    /// Double-condition probability above this is a "strong" finding.
    pub strong: f64,
    /// Above this (and at most `strong`) is "moderate"; otherwise "weak".
    pub moderate: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            differential: 0.1,
            strong: 0.7,
            moderate: 0.5,
        }
    }
}

impl InsightThresholds {
    fn tier(&self, probability: f64) -> Strength {
        if probability > self.strong {
            Strength::Strong
        } else if probability > self.moderate {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }
}

/// Generate ordered findings for one triple analysis.
///
/// The positive-correlation finding requires the double-condition probability
/// to strictly exceed the best single-condition one, and is omitted entirely
/// when that best single is 0 (no fallback value here; a percentage
/// improvement over zero is meaningless).
pub fn generate_insights(
    triple: &TripleProbabilities,
    thresholds: &InsightThresholds,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let best_single = triple.given_first.max(triple.given_second);

    if triple.given_both > best_single && best_single > 0.0 {
        let improvement = (triple.given_both - best_single) / best_single * 100.0;
        findings.push(Finding {
            kind: FindingKind::PositiveCorrelation,
            message: format!(
                "Reviews that are both {} and {} are {} {:.1}% of the time \
                 (vs {:.1}% for the best single label, +{:.1}%)",
                triple.first,
                triple.second,
                triple.target,
                triple.given_both * 100.0,
                best_single * 100.0,
                improvement
            ),
            strength: thresholds.tier(triple.given_both),
        });
    }

    let gap = (triple.given_first - triple.given_second).abs();
    if gap > thresholds.differential {
        let (stronger, stronger_prob, weaker_prob) = if triple.given_first > triple.given_second {
            (&triple.first, triple.given_first, triple.given_second)
        } else {
            (&triple.second, triple.given_second, triple.given_first)
        };
        findings.push(Finding {
            kind: FindingKind::DifferentialImpact,
            message: format!(
                "{} is the stronger predictor of {} ({:.1}% vs {:.1}%)",
                stronger,
                triple.target,
                stronger_prob * 100.0,
                weaker_prob * 100.0
            ),
            strength: Strength::Informative,
        });
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(given_first: f64, given_second: f64, given_both: f64) -> TripleProbabilities {
        TripleProbabilities {
            first: "relevance".to_string(),
            second: "concreteness".to_string(),
            target: "constructive".to_string(),
            given_first,
            given_second,
            given_both,
        }
    }

    #[test]
    fn test_positive_correlation_emitted() {
        let findings = generate_insights(&triple(0.4, 0.35, 0.8), &InsightThresholds::default());

        assert_eq!(findings[0].kind, FindingKind::PositiveCorrelation);
        assert_eq!(findings[0].strength, Strength::Strong);
        assert!(findings[0].message.contains("80.0%"));
        assert!(findings[0].message.contains("+100.0%"));
    }

    #[test]
    fn test_no_positive_finding_when_double_not_better() {
        let findings = generate_insights(&triple(0.6, 0.55, 0.5), &InsightThresholds::default());
        assert!(findings
            .iter()
            .all(|f| f.kind != FindingKind::PositiveCorrelation));
    }

    #[test]
    fn test_zero_single_omits_positive_finding() {
        // Division by zero is avoided by omission, not by a fallback value.
        let findings = generate_insights(&triple(0.0, 0.0, 0.9), &InsightThresholds::default());
        assert!(findings
            .iter()
            .all(|f| f.kind != FindingKind::PositiveCorrelation));
    }

    #[test]
    fn test_strength_tiers() {
        let thresholds = InsightThresholds::default();
        let strong = generate_insights(&triple(0.3, 0.3, 0.71), &thresholds);
        assert_eq!(strong[0].strength, Strength::Strong);

        let moderate = generate_insights(&triple(0.3, 0.3, 0.6), &thresholds);
        assert_eq!(moderate[0].strength, Strength::Moderate);

        let weak = generate_insights(&triple(0.3, 0.3, 0.4), &thresholds);
        assert_eq!(weak[0].strength, Strength::Weak);
    }

    #[test]
    fn test_differential_impact_names_stronger_predictor() {
        let findings = generate_insights(&triple(0.2, 0.5, 0.1), &InsightThresholds::default());

        let differential = findings
            .iter()
            .find(|f| f.kind == FindingKind::DifferentialImpact)
            .expect("differential finding");
        assert!(differential.message.starts_with("concreteness"));
        assert_eq!(differential.strength, Strength::Informative);
    }

    #[test]
    fn test_no_differential_below_threshold() {
        let findings = generate_insights(&triple(0.45, 0.5, 0.1), &InsightThresholds::default());
        assert!(findings
            .iter()
            .all(|f| f.kind != FindingKind::DifferentialImpact));
    }

    #[test]
    fn test_findings_are_ordered() {
        // Both findings fire: positive correlation first, differential second.
        let findings = generate_insights(&triple(0.6, 0.3, 0.8), &InsightThresholds::default());
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].kind, FindingKind::PositiveCorrelation);
        assert_eq!(findings[1].kind, FindingKind::DifferentialImpact);
    }
}
