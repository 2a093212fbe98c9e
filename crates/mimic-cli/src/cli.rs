//! CLI argument definitions for the cleaner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mimic_standards::default_data_dir;
use mimic_transform::DEFAULT_AGE_REFERENCE;

#[derive(Parser)]
#[command(
    name = "mimic-clean",
    version,
    about = "Clean MIMIC-III CSV exports into typed Parquet files",
    long_about = "Clean MIMIC-III CSV exports into typed Parquet files.\n\n\
                  Each dataset is normalized, cast and null-filled according to its spec.\n\
                  Built-in specs cover ADMISSIONS, CALLOUT, ICUSTAYS, LABEVENTS and PATIENTS."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean one or more datasets and write Parquet outputs.
    Clean(CleanArgs),

    /// List the built-in dataset specs.
    Datasets,

    /// Compute the average patient age from a PATIENTS export.
    Age(AgeArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Dataset names to clean (e.g. ADMISSIONS LABEVENTS).
    #[arg(value_name = "DATASET", required_unless_present = "all")]
    pub datasets: Vec<String>,

    /// Clean every known dataset.
    #[arg(long = "all", conflicts_with = "datasets")]
    pub all: bool,

    /// Directory the raw CSV exports are read from (default: $MIMIC_DATA_DIR or .).
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory Parquet outputs are written to (default: the input directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Additional dataset spec (TOML). Overrides a built-in spec of the same name.
    #[arg(long = "spec", value_name = "FILE")]
    pub specs: Vec<PathBuf>,

    /// Write a JSON run report.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Keep header names as written instead of lower-casing them.
    #[arg(long = "keep-header-case")]
    pub keep_header_case: bool,
}

impl CleanArgs {
    pub fn input_dir(&self) -> PathBuf {
        self.input_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| self.input_dir())
    }
}

#[derive(Parser)]
pub struct AgeArgs {
    /// Path to the PATIENTS CSV export.
    #[arg(value_name = "PATIENTS_CSV")]
    pub patients: PathBuf,

    /// Reference instant used when a patient has no date of death.
    #[arg(long = "reference", value_name = "TIMESTAMP", default_value = DEFAULT_AGE_REFERENCE)]
    pub reference: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
