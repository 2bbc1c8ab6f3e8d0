//! Binary label-presence vectors.
//!
//! Converts review records into per-label 0/1 vectors aligned by record
//! index, the input shape the correlation builder works on.

use crate::models::ReviewRecord;
use std::collections::HashMap;

/// Build one binary presence vector per universe label.
///
/// The vector for a label has one entry per record: 1 if the record carries
/// the label, else 0. Pure function; an empty universe yields an empty map.
pub fn build_label_vectors(
    records: &[ReviewRecord],
    labels: &[String],
) -> HashMap<String, Vec<u8>> {
    let mut vectors = HashMap::with_capacity(labels.len());

    for label in labels {
        let vector = records
            .iter()
            .map(|record| u8::from(record.has_label(label)))
            .collect();
        vectors.insert(label.clone(), vector);
    }

    vectors
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
    fn test_vectors_align_with_records() {
        let records = vec![
            ReviewRecord::with_labels(["relevance", "constructive"]),
            ReviewRecord::with_labels(["concreteness"]),
            ReviewRecord::with_labels(Vec::<String>::new()),
        ];

        let vectors = build_label_vectors(&records, &universe());

        assert_eq!(vectors["relevance"], vec![1, 0, 0]);
        assert_eq!(vectors["concreteness"], vec![0, 1, 0]);
        assert_eq!(vectors["constructive"], vec![1, 0, 0]);
    }

    #[test]
    fn test_empty_universe_yields_empty_map() {
        let records = vec![ReviewRecord::with_labels(["relevance"])];
        let vectors = build_label_vectors(&records, &[]);
        assert!(vectors.is_empty());
    }

    #[test]
    fn test_out_of_universe_labels_ignored() {
        let records = vec![ReviewRecord::with_labels(["relevance", "spurious"])];
        let vectors = build_label_vectors(&records, &universe());
        assert_eq!(vectors.len(), 3);
        assert!(!vectors.contains_key("spurious"));
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            ReviewRecord::with_labels(["relevance"]),
            ReviewRecord::with_labels(["concreteness", "constructive"]),
        ];
        let first = build_label_vectors(&records, &universe());
        let second = build_label_vectors(&records, &universe());
        assert_eq!(first, second);
    }
}
