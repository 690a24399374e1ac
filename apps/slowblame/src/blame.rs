//! Version-control attribution for example locations.
//!
//! Each lookup spawns the blame command once, scoped to a single line, and
//! parses its first output line. Anything unexpected (spawn failure,
//! non-zero exit, timeout, empty or unrecognized output) yields `None`; a
//! missing attribution never fails the report.

use crate::models::{Attribution, Location};
use regex::Regex;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::{mpsc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Source of attribution records.
pub trait Blame {
    fn blame(&self, location: &Location) -> Option<Attribution>;
}

/// Attribution disabled (`--no-blame`).
pub struct NoBlame;

impl Blame for NoBlame {
    fn blame(&self, _location: &Location) -> Option<Attribution> {
        None
    }
}

/// Runs `<program> <args..> -c --date=short -L <line>,<line> <file>` in `cwd`.
pub struct GitBlame {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub timeout: Duration,
}

impl GitBlame {
    /// Build from a command vector such as `["git", "blame"]`.
    pub fn from_command(command: &[String], cwd: PathBuf, timeout: Duration) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(GitBlame {
            program: program.clone(),
            args: args.to_vec(),
            cwd,
            timeout,
        })
    }

    fn command_for(&self, location: &Location) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("-c")
            .arg("--date=short")
            .arg("-L")
            .arg(format!("{},{}", location.line, location.line))
            .arg(&location.file)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        cmd
    }
}

impl Blame for GitBlame {
    fn blame(&self, location: &Location) -> Option<Attribution> {
        debug!(%location, program = %self.program, "resolving attribution");
        let stdout = run_with_timeout(self.command_for(location), self.timeout)?;
        let parsed = parse_blame(&stdout);
        if parsed.is_none() {
            debug!(%location, "blame output not recognized");
        }
        parsed
    }
}

/// Spawn `cmd` and collect stdout if it exits successfully before `timeout`.
///
/// Stdout is drained on a reader thread so a chatty command cannot block on
/// a full pipe while we wait for it to exit.
fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Option<String> {
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "failed to spawn blame command");
            return None;
        }
    };
    let (tx, rx) = mpsc::channel();
    if let Some(mut stdout) = child.stdout.take() {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stdout.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });
    }
    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                warn!(timeout_ms = timeout.as_millis() as u64, "blame command timed out");
                return None;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                debug!(error = %e, "failed to wait for blame command");
                let _ = child.kill();
                return None;
            }
        }
    };
    if !status.success() {
        debug!(status = ?status.code(), "blame command failed");
        return None;
    }
    // A leftover grandchild may hold the pipe open; do not wait past the deadline.
    let remaining = deadline.saturating_duration_since(Instant::now());
    let buf = rx.recv_timeout(remaining.max(POLL_INTERVAL)).ok()?;
    Some(String::from_utf8_lossy(&buf).into_owned())
}

fn blame_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // <commit> [<orig path>] (<author> <date>[ <time>[ <tz>]] <line>)
        Regex::new(
            r"^\^?(?P<commit>[^\s(^]+)\s+(?:[^\s(]+\s+)?\((?P<author>.*?)\s+(?P<date>\d{4}-\d{2}-\d{2})(?:[T ]\d{2}:\d{2}:\d{2}(?:\s*(?:[+-]\d{2}:?\d{2}|Z))?)?\s+(?P<line>\d+)\)",
        )
        .expect("blame pattern is valid")
    })
}

/// Parse the first line of `git blame -c` style output.
///
/// Expected shape: `<commit><ws>(<author><ws><date><ws><line>)`. The author
/// may contain spaces, hyphens, or digits and is trimmed; the date is the
/// `YYYY-MM-DD` token (a trailing ISO time and zone are accepted and
/// dropped). A `^` boundary marker before the commit is removed. Empty
/// output, unrelated text, or an empty author returns `None`.
pub fn parse_blame(output: &str) -> Option<Attribution> {
    let line = output.lines().find(|l| !l.trim().is_empty())?;
    let caps = blame_line_regex().captures(line.trim_start())?;
    let author = caps["author"].trim();
    if author.is_empty() {
        return None;
    }
    Some(Attribution {
        commit: caps["commit"].to_string(),
        author: author.to_string(),
        date: caps["date"].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_padded_short_date() {
        let got = parse_blame("i0r2i2s5        ( dseeto     2014-05-23      10)").unwrap();
        assert_eq!(got.commit, "i0r2i2s5");
        assert_eq!(got.author, "dseeto");
        assert_eq!(got.date, "2014-05-23");
    }

    #[test]
    fn test_parse_tab_separated_compat_output() {
        let out = "4d3c2b1a\t(  Jane Van-Doe\t2019-11-02\t42)    it \"works\" do\n";
        let got = parse_blame(out).unwrap();
        assert_eq!(got.commit, "4d3c2b1a");
        assert_eq!(got.author, "Jane Van-Doe");
        assert_eq!(got.date, "2019-11-02");
    }

    #[test]
    fn test_parse_iso_date() {
        let out = "4d3c2b1a (Jane Doe 2019-11-02 14:03:59 +0100 42) it";
        let got = parse_blame(out).unwrap();
        assert_eq!(got.author, "Jane Doe");
        assert_eq!(got.date, "2019-11-02");
    }

    #[test]
    fn test_parse_author_with_digits_and_boundary_commit() {
        let out = "^badc0de\t(build-bot2\t2021-01-15\t7)code";
        let got = parse_blame(out).unwrap();
        assert_eq!(got.commit, "badc0de");
        assert_eq!(got.author, "build-bot2");
    }

    #[test]
    fn test_parse_with_original_filename_column() {
        let out = "4d3c2b1a spec/old_spec.rb (Jane Doe 2019-11-02 42) it";
        let got = parse_blame(out).unwrap();
        assert_eq!(got.commit, "4d3c2b1a");
        assert_eq!(got.author, "Jane Doe");
    }

    #[test]
    fn test_parse_missing_author_is_absent() {
        assert!(parse_blame("4d3c2b1a\t(\t2019-11-02\t42)").is_none());
    }

    #[test]
    fn test_parse_empty_or_unrelated_is_absent() {
        assert!(parse_blame("").is_none());
        assert!(parse_blame("\n\n").is_none());
        assert!(parse_blame("fatal: no such path 'spec/x_spec.rb' in HEAD").is_none());
        assert!(parse_blame("hello world").is_none());
    }

    #[test]
    fn test_no_blame_is_always_absent() {
        assert!(NoBlame.blame(&Location::new("a.rb", 1)).is_none());
    }

    #[test]
    fn test_from_command_requires_program() {
        assert!(GitBlame::from_command(&[], PathBuf::from("."), DEFAULT_TIMEOUT).is_none());
        let gb = GitBlame::from_command(
            &["git".to_string(), "blame".to_string()],
            PathBuf::from("."),
            DEFAULT_TIMEOUT,
        )
        .unwrap();
        assert_eq!(gb.program, "git");
        assert_eq!(gb.args, vec!["blame"]);
    }

    #[cfg(unix)]
    fn sh(script: &str, timeout: Duration) -> GitBlame {
        GitBlame {
            program: "sh".into(),
            args: vec!["-c".into(), script.into(), "sh".into()],
            cwd: std::env::temp_dir(),
            timeout,
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_subprocess_receives_single_line_range() {
        let script = r#"[ "$1" = "-c" ] && [ "$2" = "--date=short" ] && [ "$3" = "-L" ] && [ "$4" = "7,7" ] && [ "$5" = "spec/a_spec.rb" ] && echo 'deadbeef ( Jane Doe 2020-01-02 7)'"#;
        let got = sh(script, DEFAULT_TIMEOUT)
            .blame(&Location::new("spec/a_spec.rb", 7))
            .unwrap();
        assert_eq!(got.commit, "deadbeef");
        assert_eq!(got.author, "Jane Doe");
        assert_eq!(got.date, "2020-01-02");
    }

    #[cfg(unix)]
    #[test]
    fn test_subprocess_failure_is_absent() {
        let gb = sh("echo 'deadbeef ( Jane 2020-01-02 7)'; exit 128", DEFAULT_TIMEOUT);
        assert!(gb.blame(&Location::new("a.rb", 7)).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_subprocess_large_output_is_drained() {
        // 200 KB after the blame line overflows the pipe buffer
        let script = r#"echo 'deadbeef ( Jane Doe 2020-01-02 7)'; head -c 200000 /dev/zero | tr '\0' x"#;
        let start = Instant::now();
        let got = sh(script, Duration::from_millis(2000))
            .blame(&Location::new("a.rb", 7))
            .unwrap();
        assert_eq!(got.commit, "deadbeef");
        assert_eq!(got.author, "Jane Doe");
        assert!(start.elapsed() < Duration::from_millis(2000));
    }

    #[cfg(unix)]
    #[test]
    fn test_subprocess_timeout_is_absent() {
        let gb = sh("exec sleep 5", Duration::from_millis(100));
        let start = Instant::now();
        assert!(gb.blame(&Location::new("a.rb", 1)).is_none());
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_missing_program_is_absent() {
        let gb = GitBlame {
            program: "slowblame-no-such-program".into(),
            args: vec![],
            cwd: std::env::temp_dir(),
            timeout: DEFAULT_TIMEOUT,
        };
        assert!(gb.blame(&Location::new("a.rb", 1)).is_none());
    }
}
