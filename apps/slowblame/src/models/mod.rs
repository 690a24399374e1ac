//! Shared data models for test results, group summaries, and attribution.

pub mod results;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// A `path:line` source position. Lines are 1-based.
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Location {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl FromStr for Location {
    type Err = crate::error::Error;

    /// Parse `path:line`, dropping a trailing `:in \`block ...` caller suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::error::Error::InvalidLocation(s.to_string());
        let head = s.split(":in `").next().unwrap_or(s).trim();
        let (file, line) = head.rsplit_once(':').ok_or_else(invalid)?;
        let line: u32 = line.trim().parse().map_err(|_| invalid())?;
        if file.is_empty() || line == 0 {
            return Err(invalid());
        }
        Ok(Location::new(file, line))
    }
}

impl TryFrom<String> for Location {
    type Error = crate::error::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Location> for String {
    fn from(loc: Location) -> String {
        loc.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// An enclosing example group.
pub struct GroupRef {
    pub description: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single executed example as reported by the test framework.
pub struct TestResult {
    pub description: String,
    /// Enclosing groups, outermost first.
    #[serde(default)]
    pub groups: Vec<GroupRef>,
    pub location: Location,
    pub run_time: f64,
}

impl TestResult {
    /// Group descriptions followed by the example description.
    pub fn full_description(&self) -> String {
        self.groups
            .iter()
            .map(|g| g.description.as_str())
            .chain(std::iter::once(self.description.as_str()))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn top_group(&self) -> Option<&GroupRef> {
        self.groups.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Timing totals for one outermost example group.
pub struct GroupSummary {
    pub location: Location,
    pub description: String,
    pub total_time: f64,
    pub count: usize,
}

impl GroupSummary {
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_time / self.count as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Last-change metadata for a source line.
pub struct Attribution {
    pub commit: String,
    pub author: String,
    pub date: String,
}
