//! Output rendering for profile reports.
//!
//! Supports `human` (default) and `json` outputs. Both ask the attribution
//! source once per reported example; an absent attribution simply drops the
//! trailing `Author: ...` column (human) or yields `null` (json).

use crate::blame::Blame;
use crate::models::{Attribution, GroupSummary, TestResult};
use crate::report::{ProfileReport, ProfileSettings};
use crate::timefmt::{format_percentage, format_seconds, pluralize};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

const RUN_TIME_WIDTH: usize = 19;
const LOCATION_WIDTH: usize = 79;

pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Presentation options for the human report.
pub struct RenderOptions<'a> {
    pub color: bool,
    /// Absolute example paths are shown relative to this root.
    pub root: Option<&'a Path>,
}

impl RenderOptions<'_> {
    fn bold(&self, s: &str) -> String {
        if self.color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn location(&self, file: &str, line: u32) -> String {
        format!("{}:{}", utils::display_path(file, self.root), line)
    }
}

/// Print the report to stdout in the requested format.
pub fn print_report(
    results: &[TestResult],
    settings: &ProfileSettings,
    blame: &dyn Blame,
    output: &str,
    root: Option<&Path>,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match output {
        "json" => {
            let report = ProfileReport::build(results, settings);
            let value = compose_report_json(&report, blame);
            serde_json::to_writer_pretty(&mut out, &value)?;
            writeln!(out)
        }
        _ => {
            let opts = RenderOptions {
                color: use_colors(output),
                root,
            };
            write_profile(&mut out, results, settings, blame, &opts)
        }
    }
}

/// Build and render a human report, timing the whole pass.
pub fn write_profile<W: Write>(
    out: &mut W,
    results: &[TestResult],
    settings: &ProfileSettings,
    blame: &dyn Blame,
    opts: &RenderOptions,
) -> io::Result<()> {
    let start = Instant::now();
    let report = ProfileReport::build(results, settings);
    render(out, &report, blame, opts)?;
    writeln!(
        out,
        "\nProfiling finished in {} secs.",
        format_seconds(start.elapsed().as_secs_f64())
    )
}

/// Write the threshold banner, example section, and group section.
pub fn render<W: Write>(
    out: &mut W,
    report: &ProfileReport,
    blame: &dyn Blame,
    opts: &RenderOptions,
) -> io::Result<()> {
    if let Some(t) = report.threshold {
        writeln!(
            out,
            "\nPrinting examples and example groups exceeding the profile threshold ({} secs):",
            format_seconds(t)
        )?;
    }
    render_examples(out, report, blame, opts)?;
    render_groups(out, report, opts)
}

fn render_examples<W: Write>(
    out: &mut W,
    report: &ProfileReport,
    blame: &dyn Blame,
    opts: &RenderOptions,
) -> io::Result<()> {
    if let (Some(t), true) = (report.threshold, report.examples.is_empty()) {
        return writeln!(out, "\nAll examples are faster than {} secs.", format_seconds(t));
    }
    let qualifier = match report.threshold {
        Some(t) => format!(" greater than {} secs", format_seconds(t)),
        None => String::new(),
    };
    writeln!(
        out,
        "\nSlowest {}{} finished in {} secs ({}% of total time: {} secs):",
        pluralize(report.examples.len(), "example"),
        qualifier,
        format_seconds(report.slow_time),
        format_percentage(report.percentage()),
        format_seconds(report.total_time)
    )?;
    for ex in &report.examples {
        render_example(out, ex, blame.blame(&ex.location).as_ref(), opts)?;
    }
    Ok(())
}

fn render_example<W: Write>(
    out: &mut W,
    ex: &TestResult,
    attribution: Option<&Attribution>,
    opts: &RenderOptions,
) -> io::Result<()> {
    writeln!(out, "  {}", ex.full_description())?;
    let time_col = format!("    {} secs", format_seconds(ex.run_time));
    let loc_col = format!(" {}", opts.location(&ex.location.file, ex.location.line));
    match attribution {
        Some(a) => writeln!(
            out,
            "{:<tw$}{:<lw$} Author: {}, Date: {}, Hash: {}",
            time_col,
            loc_col,
            a.author,
            a.date,
            a.commit,
            tw = RUN_TIME_WIDTH,
            lw = LOCATION_WIDTH
        ),
        None => writeln!(out, "{:<tw$}{}", time_col, loc_col, tw = RUN_TIME_WIDTH),
    }
}

fn render_groups<W: Write>(
    out: &mut W,
    report: &ProfileReport,
    opts: &RenderOptions,
) -> io::Result<()> {
    // Single-group suites have nothing to rank.
    if report.group_count <= 1 {
        return Ok(());
    }
    if report.groups.is_empty() {
        return match report.threshold {
            Some(t) => writeln!(
                out,
                "\nAll example groups are faster than {} secs.",
                format_seconds(t)
            ),
            None => Ok(()),
        };
    }
    writeln!(
        out,
        "\nTop {} slowest example groups:",
        report.groups.len()
    )?;
    for g in &report.groups {
        render_group(out, g, opts)?;
    }
    Ok(())
}

fn render_group<W: Write>(out: &mut W, g: &GroupSummary, opts: &RenderOptions) -> io::Result<()> {
    writeln!(out, "  {}", g.description)?;
    writeln!(
        out,
        "    {} {} average ({} seconds / {}) {}",
        opts.bold(&format_seconds(g.average())),
        opts.bold("seconds"),
        format_seconds(g.total_time),
        pluralize(g.count, "example"),
        opts.location(&g.location.file, g.location.line)
    )
}

/// Compose the report JSON object (pure apart from attribution lookups).
pub fn compose_report_json(report: &ProfileReport, blame: &dyn Blame) -> JsonVal {
    let examples: Vec<_> = report
        .examples
        .iter()
        .map(|ex| {
            json!({
                "description": ex.description,
                "full_description": ex.full_description(),
                "location": ex.location,
                "run_time": ex.run_time,
                "attribution": blame.blame(&ex.location),
            })
        })
        .collect();
    let groups: Vec<_> = report
        .groups
        .iter()
        .map(|g| {
            json!({
                "description": g.description,
                "location": g.location,
                "average": g.average(),
                "total_time": g.total_time,
                "count": g.count,
            })
        })
        .collect();
    let summary = json!({
        "examples": report.examples.len(),
        "groups": report.groups.len(),
        "group_count": report.group_count,
        "results": report.result_count,
        "slow_time": report.slow_time,
        "total_time": report.total_time,
        "percentage": report.percentage(),
    });
    json!({
        "threshold": report.threshold,
        "examples": examples,
        "groups": groups,
        "summary": summary,
    })
}
