//! Conditional-probability estimation from co-occurrence counts.
//!
//! All arithmetic here is total: division goes through [`safe_div`], which
//! maps a zero or non-finite denominator to 0 instead of NaN, so one empty
//! dataset or missing label can never poison downstream rendering.

use crate::analysis::cooccurrence::CooccurrenceCounts;
use crate::models::Condition;
use serde::Serialize;
use std::collections::BTreeMap;

/// Division that can never produce NaN, Infinity, or a negative probability.
///
/// A denominator that is zero, negative, or non-finite yields 0.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator.is_finite() && denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// P(target | antecedent) = D({antecedent, target}) / S(antecedent).
pub fn given_single(counts: &CooccurrenceCounts, antecedent: &str, target: &str) -> f64 {
    let pair = counts.pair_count(antecedent, target) as f64;
    safe_div(pair, counts.single_count(antecedent) as f64)
}

/// P(target | a ∧ b) = T({a, b, target}) / D({a, b}).
///
/// A missing or zero D({a, b}) falls back to a denominator of 1, matching
/// the original tool. With no pair evidence and a nonzero triple count the
/// result is the raw triple count and can exceed 1.0; callers that need to
/// distinguish "no evidence" should consult [`CooccurrenceCounts::pair_count`].
pub fn given_pair(counts: &CooccurrenceCounts, a: &str, b: &str, target: &str) -> f64 {
    let triple = counts.triple_count(a, b, target) as f64;
    let pair = counts.pair_count(a, b);
    let denominator = if pair == 0 { 1.0 } else { pair as f64 };
    safe_div(triple, denominator)
}

/// Overall "predicts-others" probability for one label: the sum of pairwise
/// co-occurrences involving the label over its single count.
pub fn predicts_others(counts: &CooccurrenceCounts, label: &str) -> f64 {
    safe_div(
        counts.pair_total_for(label) as f64,
        counts.single_count(label) as f64,
    )
}

/// Probabilities for the canonical triple: the first two universe labels as
/// conditions, the last as target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripleProbabilities {
    /// First condition label.
    pub first: String,
    /// Second condition label.
    pub second: String,
    /// Target label.
    pub target: String,
    /// P(target | first).
    pub given_first: f64,
    /// P(target | second).
    pub given_second: f64,
    /// P(target | first ∧ second).
    pub given_both: f64,
}

/// Every conditional probability derived from one co-occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityTable {
    /// P(target | antecedents) for every ordered label pair, plus the
    /// double-condition entries when the universe has exactly three labels.
    pub conditionals: BTreeMap<Condition, f64>,
    /// Per-label predicts-others probability.
    pub predicts_others: BTreeMap<String, f64>,
    /// The canonical triple analysis, present for three-label universes.
    pub triple: Option<TripleProbabilities>,
}

impl ProbabilityTable {
    /// Look up P(target | antecedent); 0 when the entry is absent.
    pub fn single(&self, antecedent: &str, target: &str) -> f64 {
        self.conditionals
            .get(&Condition::single(antecedent, target))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Estimate the full conditional-probability table for one count.
pub fn estimate_conditional_probabilities(counts: &CooccurrenceCounts) -> ProbabilityTable {
    let labels = counts.labels();
    let mut conditionals = BTreeMap::new();
    let mut predicts = BTreeMap::new();

    for antecedent in labels {
        for target in labels {
            if antecedent == target {
                continue;
            }
            conditionals.insert(
                Condition::single(antecedent, target),
                given_single(counts, antecedent, target),
            );
        }
        predicts.insert(antecedent.clone(), predicts_others(counts, antecedent));
    }

    let triple = if labels.len() == 3 {
        for k in 0..3 {
            let target = &labels[k];
            let (a, b) = (&labels[(k + 1) % 3], &labels[(k + 2) % 3]);
            conditionals.insert(
                Condition::pair(a, b, target),
                given_pair(counts, a, b, target),
            );
        }
        Some(TripleProbabilities {
            first: labels[0].clone(),
            second: labels[1].clone(),
            target: labels[2].clone(),
            given_first: given_single(counts, &labels[0], &labels[2]),
            given_second: given_single(counts, &labels[1], &labels[2]),
            given_both: given_pair(counts, &labels[0], &labels[1], &labels[2]),
        })
    } else {
        None
    };

    ProbabilityTable {
        conditionals,
        predicts_others: predicts,
        triple,
    }
}
