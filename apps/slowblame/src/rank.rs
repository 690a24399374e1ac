//! Slowest-example ranking.

use crate::models::TestResult;

/// Select the `max_items` slowest results, slowest first.
///
/// The sort is stable so equal run times keep their input order. When a
/// `threshold` is given it is applied after truncation: only items strictly
/// slower than the threshold survive, which may leave fewer than
/// `max_items` (or none).
pub fn slowest_examples(
    results: &[TestResult],
    max_items: usize,
    threshold: Option<f64>,
) -> Vec<&TestResult> {
    let mut sorted: Vec<&TestResult> = results.iter().collect();
    sorted.sort_by(|a, b| b.run_time.total_cmp(&a.run_time));
    sorted.truncate(max_items);
    if let Some(t) = threshold {
        sorted.retain(|r| r.run_time > t);
    }
    sorted
}

/// Sum of run times.
pub fn total_time<'a>(results: impl IntoIterator<Item = &'a TestResult>) -> f64 {
    results.into_iter().map(|r| r.run_time).sum()
}

/// `part / total * 100`, or `0.0` when `total` is zero.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}
