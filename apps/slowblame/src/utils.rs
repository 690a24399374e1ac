//! Supporting helpers: stderr prefixes, logging setup, path display.

use owo_colors::OwoColorize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "SLOWBLAME_LOG";

fn colors_on_stderr() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_on_stderr() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_on_stderr() {
        "note:".yellow().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_on_stderr() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// Install the stderr `tracing` subscriber, filtered by `SLOWBLAME_LOG`
/// (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Show absolute paths under `root` relative to it; leave others untouched.
pub fn display_path(file: &str, root: Option<&Path>) -> String {
    let p = Path::new(file);
    match root {
        Some(root) if p.is_absolute() && p.starts_with(root) => pathdiff::diff_paths(p, root)
            .map(|rel| rel.to_string_lossy().to_string())
            .unwrap_or_else(|| file.to_string()),
        _ => file.to_string(),
    }
}
