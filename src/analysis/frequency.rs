//! Per-assignment label frequency statistics.
//!
//! Groups records by assignment and reports what share of each group's
//! reviews carries each universe label, the numbers behind the original
//! per-homework frequency chart.

use crate::models::ReviewRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Group name used for records that carry no assignment field.
pub const UNASSIGNED: &str = "(unassigned)";

/// Label frequency for one assignment group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelFrequency {
    /// Records in the group.
    pub total: usize,
    /// Percentage (0-100) of the group's records carrying each label.
    pub percent: BTreeMap<String, f64>,
}

/// Group records by their assignment name.
pub fn group_by_assignment(records: &[ReviewRecord]) -> BTreeMap<String, Vec<&ReviewRecord>> {
    let mut grouped: BTreeMap<String, Vec<&ReviewRecord>> = BTreeMap::new();

    for record in records {
        let key = record
            .assignment
            .clone()
            .unwrap_or_else(|| UNASSIGNED.to_string());
        grouped.entry(key).or_default().push(record);
    }

    grouped
}

/// Per-assignment percentage of records carrying each universe label.
///
/// An empty group reports 0 for every label rather than dividing by zero.
pub fn label_frequency(
    records: &[ReviewRecord],
    labels: &[String],
) -> BTreeMap<String, LabelFrequency> {
    let mut frequencies = BTreeMap::new();

    for (assignment, group) in group_by_assignment(records) {
        let total = group.len();
        let mut percent = BTreeMap::new();

        for label in labels {
            let carrying = group.iter().filter(|r| r.has_label(label)).count();
            let share = if total > 0 {
                carrying as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            percent.insert(label.clone(), share);
        }

        frequencies.insert(assignment, LabelFrequency { total, percent });
    }

    frequencies
}
