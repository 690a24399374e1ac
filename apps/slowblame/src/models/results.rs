//! Results file schema written by the test framework adapter.

use super::TestResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
/// Top-level results document.
pub struct ResultsFile {
    /// Framework that produced the file, informational only.
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default)]
    pub examples: Vec<TestResult>,
}
