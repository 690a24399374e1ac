//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "slowblame",
    version,
    about = "Profile a finished test run and blame its slowest examples",
    long_about = "slowblame ranks the slowest examples and example groups of a completed test run and attributes each slow example to its last commit via git blame.\n\nConfiguration precedence: CLI > slowblame.toml > defaults.",
    after_help = "Examples:\n  slowblame report --results tmp/rspec.json\n  slowblame report --results 'tmp/shards/*.json' --profile 20 --threshold 0.5\n  slowblame report --results tmp/rspec.json --output json --no-blame",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current slowblame version."
    )]
    Version,
    /// Print the profile report
    #[command(
        about = "Print the profile report",
        long_about = "Rank the slowest examples and example groups from one or more results files. Each reported example is annotated with author, date, and commit from the blame command.",
        after_help = "Examples:\n  slowblame report --results tmp/rspec.json\n  slowblame report --results tmp/rspec.json --threshold 1.5"
    )]
    Report {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Results file or glob, repeatable (required unless configured)")]
        results: Vec<String>,
        #[arg(long, help = "Number of slowest examples and groups to show (default: 10)")]
        profile: Option<usize>,
        #[arg(long, help = "Only report items slower than this many seconds")]
        threshold: Option<f64>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Skip blame lookups")]
        no_blame: bool,
        #[arg(long, help = "Per-lookup blame timeout in milliseconds (default: 2000)")]
        blame_timeout_ms: Option<u64>,
    },
}
