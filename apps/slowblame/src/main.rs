//! slowblame CLI binary entry point.
//! Resolves configuration, loads results, and prints the profile report.

use clap::Parser;
use slowblame::blame::{Blame, GitBlame, NoBlame};
use slowblame::cli::{Cli, Commands};
use slowblame::config::{self, Overrides};
use slowblame::utils::{error_prefix, info_prefix, init_logging, note_prefix};
use slowblame::output::print_report;
use slowblame::results::load_results;
use std::io;

fn main() {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Report {
            repo_root,
            results,
            profile,
            threshold,
            output,
            no_blame,
            blame_timeout_ms,
        } => {
            let eff = match config::resolve_effective(&Overrides {
                repo_root,
                results,
                output,
                max_items: profile,
                threshold,
                no_blame,
                blame_timeout_ms,
            }) {
                Ok(eff) => eff,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            };
            if !eff.results_configured {
                eprintln!(
                    "{} {}",
                    error_prefix(),
                    "Results are not configured. Pass --results or add slowblame.toml."
                );
                std::process::exit(2);
            }
            if !eff.config_found && eff.output != "json" {
                eprintln!("{} {}", note_prefix(), "No slowblame.toml found; using defaults.");
            }
            let all = match load_results(&eff.repo_root, &eff.results) {
                Ok(all) => all,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            };
            let git;
            let blame: &dyn Blame = if eff.blame_enabled {
                match GitBlame::from_command(
                    &eff.blame_command,
                    eff.repo_root.clone(),
                    eff.blame_timeout,
                ) {
                    Some(g) => {
                        git = g;
                        &git
                    }
                    None => &NoBlame,
                }
            } else {
                if eff.output != "json" {
                    eprintln!("{} {}", info_prefix(), "Blame lookups disabled.");
                }
                &NoBlame
            };
            if let Err(e) = print_report(
                &all,
                &eff.settings,
                blame,
                &eff.output,
                Some(eff.repo_root.as_path()),
            ) {
                // A closed pipe (e.g. `| head`) is not worth reporting.
                if e.kind() != io::ErrorKind::BrokenPipe {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(1);
                }
            }
        }
    }
}
