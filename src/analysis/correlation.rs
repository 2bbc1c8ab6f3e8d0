//! Pearson correlation over label-presence vectors.
//!
//! Coefficients are computed with the standard raw-sum formula. A vector
//! with zero variance (label never or always present) has no defined
//! correlation; the coefficient is fixed at 0 for downstream rendering.

use crate::models::ReviewRecord;
use std::collections::{BTreeMap, HashMap};

/// Pearson correlation coefficient between two aligned samples.
///
/// Returns 0 for empty input and for zero-variance samples instead of NaN.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;

    for i in 0..n {
        sum_x += x[i];
        sum_y += y[i];
        sum_xy += x[i] * y[i];
        sum_x2 += x[i] * x[i];
        sum_y2 += y[i] * y[i];
    }

    let n = n as f64;
    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Build the full symmetric correlation matrix over binary label vectors.
///
/// The diagonal is fixed to exactly 1.0 rather than computed; the lower
/// triangle mirrors the upper one. A label whose vector is missing from the
/// map correlates at 0 with everything.
pub fn build_correlation_matrix(
    vectors: &HashMap<String, Vec<u8>>,
    labels: &[String],
) -> Vec<Vec<f64>> {
    let n = labels.len();
    let mut matrix = vec![vec![0.0; n]; n];

    let as_f64: Vec<Option<Vec<f64>>> = labels
        .iter()
        .map(|label| {
            vectors
                .get(label)
                .map(|v| v.iter().map(|&bit| f64::from(bit)).collect())
        })
        .collect();

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let coefficient = match (&as_f64[i], &as_f64[j]) {
                (Some(x), Some(y)) => pearson(x, y),
                _ => 0.0,
            };
            matrix[i][j] = coefficient;
            matrix[j][i] = coefficient;
        }
    }

    matrix
}

/// Pearson correlation between reviewer grades and each label's presence.
///
/// Only records carrying a grade participate; fewer than two graded records
/// yields 0 for every label.
pub fn grade_label_correlation(
    records: &[ReviewRecord],
    labels: &[String],
) -> BTreeMap<String, f64> {
    let graded: Vec<&ReviewRecord> = records.iter().filter(|r| r.grade.is_some()).collect();

    let mut correlations = BTreeMap::new();

    if graded.len() < 2 {
        for label in labels {
            correlations.insert(label.clone(), 0.0);
        }
        return correlations;
    }

    let grades: Vec<f64> = graded.iter().filter_map(|r| r.grade).collect();

    for label in labels {
        let presence: Vec<f64> = graded
            .iter()
            .map(|r| f64::from(u8::from(r.has_label(label))))
            .collect();
        correlations.insert(label.clone(), pearson(&grades, &presence));
    }

    correlations
}
