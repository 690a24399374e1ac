//! Slowest example-group aggregation.
//!
//! Examples are bucketed by their outermost group's location, so nested
//! groups roll up into the top-level ancestor. Groups rank by average run
//! time rather than total time.

use crate::models::{GroupSummary, Location, TestResult};
use std::collections::HashMap;

/// Bucket results by outermost group in first-seen order.
///
/// Results without any enclosing group are not attributed to a bucket.
pub fn summarize(results: &[TestResult]) -> Vec<GroupSummary> {
    let mut index: HashMap<&Location, usize> = HashMap::new();
    let mut out: Vec<GroupSummary> = Vec::new();
    for r in results {
        let Some(top) = r.top_group() else {
            continue;
        };
        match index.get(&top.location) {
            Some(&i) => {
                out[i].total_time += r.run_time;
                out[i].count += 1;
            }
            None => {
                index.insert(&top.location, out.len());
                out.push(GroupSummary {
                    location: top.location.clone(),
                    description: top.description.clone(),
                    total_time: r.run_time,
                    count: 1,
                });
            }
        }
    }
    out
}

/// Rank the `max_groups` slowest groups by average run time.
///
/// Returns nothing when the suite has at most one group. A `threshold` is
/// applied to the average after truncation, matching example ranking.
pub fn slowest_groups(
    results: &[TestResult],
    max_groups: usize,
    threshold: Option<f64>,
) -> Vec<GroupSummary> {
    let mut groups = summarize(results);
    if groups.len() <= 1 {
        return Vec::new();
    }
    groups.sort_by(|a, b| b.average().total_cmp(&a.average()));
    groups.truncate(max_groups);
    if let Some(t) = threshold {
        groups.retain(|g| g.average() > t);
    }
    groups
}
