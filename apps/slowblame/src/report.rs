//! Profile report assembly.
//!
//! `ProfileReport::build` runs the ranker and aggregator over a results set
//! with an explicit `ProfileSettings` value. The report borrows examples from
//! the input; group summaries are owned since they are derived.

use crate::groups;
use crate::models::{GroupSummary, TestResult};
use crate::rank;

pub const DEFAULT_MAX_ITEMS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Knobs supplied by the caller for one report.
pub struct ProfileSettings {
    /// Maximum examples (and groups) to report.
    pub max_items: usize,
    /// Only report items strictly slower than this many seconds.
    pub threshold: Option<f64>,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        ProfileSettings {
            max_items: DEFAULT_MAX_ITEMS,
            threshold: None,
        }
    }
}

#[derive(Debug)]
pub struct ProfileReport<'a> {
    pub examples: Vec<&'a TestResult>,
    pub groups: Vec<GroupSummary>,
    /// Distinct outermost groups in the results, before ranking.
    pub group_count: usize,
    pub threshold: Option<f64>,
    /// Number of results the report was built from.
    pub result_count: usize,
    /// Run time of all results.
    pub total_time: f64,
    /// Run time of the selected examples.
    pub slow_time: f64,
}

impl<'a> ProfileReport<'a> {
    pub fn build(results: &'a [TestResult], settings: &ProfileSettings) -> Self {
        let examples = rank::slowest_examples(results, settings.max_items, settings.threshold);
        let groups = groups::slowest_groups(results, settings.max_items, settings.threshold);
        let group_count = groups::summarize(results).len();
        let slow_time = rank::total_time(examples.iter().copied());
        ProfileReport {
            examples,
            groups,
            group_count,
            threshold: settings.threshold,
            result_count: results.len(),
            total_time: rank::total_time(results),
            slow_time,
        }
    }

    /// Share of total run time spent in the selected examples.
    pub fn percentage(&self) -> f64 {
        rank::percentage(self.slow_time, self.total_time)
    }
}
