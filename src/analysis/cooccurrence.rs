//! Label co-occurrence counting.
//!
//! Counts how often universe labels appear alone, in pairs, and as a full
//! triple across review records. The pairwise matrix uses symmetric
//! accumulation: both orderings of a pair are stored, so callers normalizing
//! by the matrix must account for the double entry.

use crate::models::{LabelPair, LabelTriple, ReviewRecord};
use std::collections::HashMap;

/// Co-occurrence counts over one record slice and label universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooccurrenceCounts {
    labels: Vec<String>,
    /// Pairwise matrix indexed by universe position; `matrix[i][j]` is the
    /// number of records carrying both label i and label j, stored in both
    /// triangles.
    pub matrix: Vec<Vec<u64>>,
    /// Records carrying each label: S(label).
    pub single: HashMap<String, u64>,
    /// Records carrying each unordered pair, one increment per record: D(pair).
    pub pairs: HashMap<LabelPair, u64>,
    /// Records carrying the full universe triple: T(triple).
    pub triples: HashMap<LabelTriple, u64>,
}

impl CooccurrenceCounts {
    /// The label universe this count was built against, in analysis order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// S(label); 0 for labels outside the universe.
    pub fn single_count(&self, label: &str) -> u64 {
        self.single.get(label).copied().unwrap_or(0)
    }

    /// D({a, b}); argument order is irrelevant.
    pub fn pair_count(&self, a: &str, b: &str) -> u64 {
        self.pairs.get(&LabelPair::new(a, b)).copied().unwrap_or(0)
    }

    /// T({a, b, c}); argument order is irrelevant.
    pub fn triple_count(&self, a: &str, b: &str, c: &str) -> u64 {
        self.triples
            .get(&LabelTriple::new(a, b, c))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of pairwise co-occurrences involving the given label.
    pub fn pair_total_for(&self, label: &str) -> u64 {
        self.pairs
            .iter()
            .filter(|(pair, _)| pair.contains(label))
            .map(|(_, count)| count)
            .sum()
    }
}

/// Count single, pairwise, and triple label co-occurrence.
///
/// Labels outside the universe are ignored; a record whose label set is a
/// strict superset of the universe still counts for every in-universe
/// combination. Records with fewer than two in-universe labels contribute
/// nothing to the pairwise counts.
pub fn count_cooccurrence(records: &[ReviewRecord], labels: &[String]) -> CooccurrenceCounts {
    let n = labels.len();
    let mut counts = CooccurrenceCounts {
        labels: labels.to_vec(),
        matrix: vec![vec![0; n]; n],
        single: labels.iter().map(|l| (l.clone(), 0)).collect(),
        pairs: HashMap::new(),
        triples: HashMap::new(),
    };

    for record in records {
        // In-universe labels present on this record, in universe order.
        let present: Vec<usize> = (0..n)
            .filter(|&i| record.has_label(&labels[i]))
            .collect();

        for &i in &present {
            *counts.single.entry(labels[i].clone()).or_insert(0) += 1;
        }

        for (pos, &i) in present.iter().enumerate() {
            for &j in &present[pos + 1..] {
                counts.matrix[i][j] += 1;
                counts.matrix[j][i] += 1;
                *counts
                    .pairs
                    .entry(LabelPair::new(&labels[i], &labels[j]))
                    .or_insert(0) += 1;
            }
        }

        if n == 3 && present.len() == 3 {
            *counts
                .triples
                .entry(LabelTriple::new(&labels[0], &labels[1], &labels[2]))
                .or_insert(0) += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    /// The worked example: records {A,B}, {A}, {B,C}.
    fn example_records() -> Vec<ReviewRecord> {
        vec![
            ReviewRecord::with_labels(["a", "b"]),
            ReviewRecord::with_labels(["a"]),
            ReviewRecord::with_labels(["b", "c"]),
        ]
    }

    #[test]
    fn test_single_counts() {
        let counts = count_cooccurrence(&example_records(), &universe());
        assert_eq!(counts.single_count("a"), 2);
        assert_eq!(counts.single_count("b"), 2);
        assert_eq!(counts.single_count("c"), 1);
    }

    #[test]
    fn test_pair_counts() {
        let counts = count_cooccurrence(&example_records(), &universe());
        assert_eq!(counts.pair_count("a", "b"), 1);
        assert_eq!(counts.pair_count("b", "c"), 1);
        assert_eq!(counts.pair_count("a", "c"), 0);
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let records = vec![
            ReviewRecord::with_labels(["a", "b", "c"]),
            ReviewRecord::with_labels(["a", "c"]),
            ReviewRecord::with_labels(["b"]),
        ];
        let counts = count_cooccurrence(&records, &universe());

        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(counts.matrix[i][j], counts.matrix[j][i]);
            }
        }
        assert_eq!(counts.matrix[0][2], 2); // a,c together twice
    }

    #[test]
    fn test_records_below_two_labels_skip_pairs() {
        let records = vec![
            ReviewRecord::with_labels(["a"]),
            ReviewRecord::with_labels(Vec::<String>::new()),
        ];
        let counts = count_cooccurrence(&records, &universe());
        assert!(counts.pairs.is_empty());
        assert!(counts.matrix.iter().flatten().all(|&v| v == 0));
    }

    #[test]
    fn test_triple_counted_with_superset_labels() {
        // Extra out-of-universe label must not block the triple count.
        let records = vec![ReviewRecord::with_labels(["a", "b", "c", "extra"])];
        let counts = count_cooccurrence(&records, &universe());
        assert_eq!(counts.triple_count("a", "b", "c"), 1);
        assert_eq!(counts.pair_count("a", "b"), 1);
    }

    #[test]
    fn test_no_triple_without_all_labels() {
        let records = vec![ReviewRecord::with_labels(["a", "b"])];
        let counts = count_cooccurrence(&records, &universe());
        assert_eq!(counts.triple_count("a", "b", "c"), 0);
    }

    #[test]
    fn test_pair_total_for() {
        let counts = count_cooccurrence(&example_records(), &universe());
        // b co-occurs once with a and once with c.
        assert_eq!(counts.pair_total_for("b"), 2);
        assert_eq!(counts.pair_total_for("a"), 1);
    }

    #[test]
    fn test_idempotent() {
        let records = example_records();
        let first = count_cooccurrence(&records, &universe());
        let second = count_cooccurrence(&records, &universe());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_records_degenerate_output() {
        let counts = count_cooccurrence(&[], &universe());
        assert!(counts.matrix.iter().flatten().all(|&v| v == 0));
        assert_eq!(counts.single_count("a"), 0);
    }
}
