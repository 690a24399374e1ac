//! slowblame core library.
//!
//! This crate ranks the slowest examples and example groups of a finished
//! test run and attributes each slow example to its last change through an
//! external blame command. It does not run tests; results are read from JSON
//! files written by the test framework adapter.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Test results, group summaries, attribution records.
//! - `results`: Results file discovery and loading.
//! - `rank`: Slowest-example ranking and percentage math.
//! - `groups`: Outermost-group aggregation ranked by average time.
//! - `blame`: Attribution lookups and blame output parsing.
//! - `report`: Report assembly from explicit settings.
//! - `output`: Human/JSON printers.
//! - `timefmt`: Duration and count formatting.
//! - `utils`: Supporting helpers.
pub mod blame;
pub mod cli;
pub mod config;
pub mod error;
pub mod groups;
pub mod models;
pub mod output;
pub mod rank;
pub mod report;
pub mod results;
pub mod timefmt;
pub mod utils;
