//! Configuration discovery and effective settings resolution.
//!
//! slowblame reads `slowblame.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `results`: none (must be configured)
//! - `output`: `human`
//! - `profile.examples`: 10
//! - `profile.threshold`: unset
//! - `blame.enabled`: true
//! - `blame.command`: `["git", "blame"]`
//! - `blame.timeout_ms`: 2000
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::blame::DEFAULT_TIMEOUT;
use crate::error::{Error, Result};
use crate::report::{ProfileSettings, DEFAULT_MAX_ITEMS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILES: [&str; 3] = ["slowblame.toml", "slowblame.yaml", "slowblame.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Profiling knobs under `[profile]`.
pub struct ProfileCfg {
    /// Number of slowest examples and groups to show.
    pub examples: Option<usize>,
    /// Seconds; only slower items are reported.
    pub threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Attribution settings under `[blame]`.
pub struct BlameCfg {
    pub enabled: Option<bool>,
    pub command: Option<Vec<String>>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `slowblame.toml|yaml`.
pub struct SlowblameConfig {
    pub results: Option<Vec<String>>,
    pub output: Option<String>,
    pub profile: Option<ProfileCfg>,
    pub blame: Option<BlameCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values supplied on the command line; `None` falls through to config.
pub struct Overrides {
    pub repo_root: Option<String>,
    pub results: Vec<String>,
    pub output: Option<String>,
    pub max_items: Option<usize>,
    pub threshold: Option<f64>,
    pub no_blame: bool,
    pub blame_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub results: Vec<String>,
    pub results_configured: bool,
    pub output: String,
    pub settings: ProfileSettings,
    pub blame_enabled: bool,
    pub blame_command: Vec<String>,
    pub blame_timeout: Duration,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `slowblame.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `SlowblameConfig` from `slowblame.toml` or `slowblame.yaml|yml`.
///
/// Returns `Ok(None)` when no config file exists and an error when one
/// exists but cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<Option<SlowblameConfig>> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<SlowblameConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<SlowblameConfig>(&s).map_err(|e| e.to_string())
        };
        return parsed
            .map(Some)
            .map_err(|message| Error::ConfigParse { path, message });
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let start = fs::canonicalize(&start).unwrap_or(start);
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let profile = cfg.profile.unwrap_or_default();
    let blame = cfg.blame.unwrap_or_default();

    let results = if cli.results.is_empty() {
        cfg.results.unwrap_or_default()
    } else {
        cli.results.clone()
    };
    let results_configured = !results.is_empty();

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(Error::InvalidConfig(format!(
            "output must be human or json, got '{}'",
            output
        )));
    }

    let max_items = cli
        .max_items
        .or(profile.examples)
        .unwrap_or(DEFAULT_MAX_ITEMS);
    if max_items == 0 {
        return Err(Error::InvalidConfig(
            "number of examples to profile must be greater than zero".into(),
        ));
    }
    let threshold = cli.threshold.or(profile.threshold);
    if let Some(t) = threshold {
        if !t.is_finite() || t < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "profile threshold must be a non-negative number of seconds, got {}",
                t
            )));
        }
    }

    let blame_enabled = !cli.no_blame && blame.enabled.unwrap_or(true);
    let blame_command = blame
        .command
        .unwrap_or_else(|| vec!["git".to_string(), "blame".to_string()]);
    if blame_enabled && blame_command.is_empty() {
        return Err(Error::InvalidConfig("blame.command must not be empty".into()));
    }
    let blame_timeout = cli
        .blame_timeout_ms
        .or(blame.timeout_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TIMEOUT);

    Ok(Effective {
        repo_root,
        config_found,
        results,
        results_configured,
        output,
        settings: ProfileSettings {
            max_items,
            threshold,
        },
        blame_enabled,
        blame_command,
        blame_timeout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn at(root: &Path) -> Overrides {
        Overrides {
            repo_root: root.to_str().map(String::from),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("slowblame.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
results = ["tmp/slowblame/*.json"]
output = "json"
[profile]
examples = 5
threshold = 0.25
[blame]
command = ["git", "blame", "-w"]
timeout_ms = 500
    "#
        )
        .unwrap();

        let eff = resolve_effective(&at(root)).unwrap();
        assert!(eff.config_found);
        assert!(eff.results_configured);
        assert_eq!(eff.results, vec!["tmp/slowblame/*.json"]);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.settings.max_items, 5);
        assert_eq!(eff.settings.threshold, Some(0.25));
        assert_eq!(eff.blame_command, vec!["git", "blame", "-w"]);
        assert_eq!(eff.blame_timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("slowblame.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
results:
  - tmp/results.json
            "#
        )
        .unwrap();

        let eff = resolve_effective(&at(root)).unwrap();
        assert_eq!(eff.results, vec!["tmp/results.json"]);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.settings, ProfileSettings::default());
        assert!(eff.blame_enabled);
        assert_eq!(eff.blame_command, vec!["git", "blame"]);
        assert_eq!(eff.blame_timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("slowblame.toml"),
            "results = [\"a.json\"]\n[profile]\nexamples = 5\nthreshold = 1.0\n[blame]\nenabled = true\n",
        )
        .unwrap();
        let cli = Overrides {
            results: vec!["b.json".into()],
            max_items: Some(3),
            threshold: Some(2.5),
            no_blame: true,
            ..at(root)
        };
        let eff = resolve_effective(&cli).unwrap();
        assert_eq!(eff.results, vec!["b.json"]);
        assert_eq!(eff.settings.max_items, 3);
        assert_eq!(eff.settings.threshold, Some(2.5));
        assert!(!eff.blame_enabled);
    }

    #[test]
    fn test_missing_config_leaves_results_unconfigured() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(&at(dir.path())).unwrap();
        assert!(!eff.config_found);
        assert!(!eff.results_configured);
    }

    #[test]
    fn test_detect_repo_root_walks_up() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("slowblame.toml"), "").unwrap();
        let nested = root.join("spec/models");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root.to_path_buf());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let zero = Overrides {
            max_items: Some(0),
            ..at(root)
        };
        assert!(matches!(resolve_effective(&zero), Err(Error::InvalidConfig(_))));
        let negative = Overrides {
            threshold: Some(-1.0),
            ..at(root)
        };
        assert!(matches!(resolve_effective(&negative), Err(Error::InvalidConfig(_))));
        let output = Overrides {
            output: Some("xml".into()),
            ..at(root)
        };
        assert!(matches!(resolve_effective(&output), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_unparsable_config_is_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("slowblame.toml"), "results = 3\n").unwrap();
        assert!(matches!(
            resolve_effective(&at(dir.path())),
            Err(Error::ConfigParse { .. })
        ));
    }
}
