//! Results discovery and loading.
//!
//! Patterns are resolved against the repository root and expanded with
//! `glob`. Matched files are read in sorted path order so that examples keep
//! a deterministic input order, which the ranker relies on for tie-breaks.

use crate::error::{Error, Result};
use crate::models::results::ResultsFile;
use crate::models::TestResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Expand `patterns` under `root` into a sorted, de-duplicated file list.
pub fn discover(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs = if Path::new(pat).is_absolute() {
            PathBuf::from(pat)
        } else {
            root.join(pat)
        };
        let pattern = abs.to_string_lossy().to_string();
        let entries = glob::glob(&pattern).map_err(|e| Error::Pattern {
            pattern: pat.clone(),
            message: e.to_string(),
        })?;
        for entry in entries.flatten() {
            if entry.is_file() {
                files.push(entry);
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Parse one results document and validate its examples.
pub fn parse_results(path: &Path, data: &str) -> Result<Vec<TestResult>> {
    let doc: ResultsFile = serde_json::from_str(data).map_err(|source| Error::ResultsParse {
        path: path.to_path_buf(),
        source,
    })?;
    for ex in &doc.examples {
        if !ex.run_time.is_finite() || ex.run_time < 0.0 {
            return Err(Error::InvalidRunTime {
                example: ex.full_description(),
                run_time: ex.run_time,
            });
        }
    }
    Ok(doc.examples)
}

/// Load and concatenate every results file matched by `patterns`.
pub fn load_results(root: &Path, patterns: &[String]) -> Result<Vec<TestResult>> {
    let files = discover(root, patterns)?;
    if files.is_empty() {
        return Err(Error::NoResults(patterns.to_vec()));
    }
    let mut all = Vec::new();
    for file in files {
        let data = fs::read_to_string(&file).map_err(|source| Error::Io {
            path: file.clone(),
            source,
        })?;
        let mut examples = parse_results(&file, &data)?;
        debug!(file = %file.display(), count = examples.len(), "loaded results");
        all.append(&mut examples);
    }
    Ok(all)
}
