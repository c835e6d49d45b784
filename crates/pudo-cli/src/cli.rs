//! CLI argument definitions for the vendor to PUDO join.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use pudo_model::DEFAULT_THRESHOLD_KM;

#[derive(Parser)]
#[command(
    name = "pudo-join",
    version,
    about = "Match each vendor to its nearest PUDO collection point",
    long_about = "Match each vendor to its nearest PUDO collection point.\n\n\
                  Candidates are picked with a k-d tree over raw latitude/longitude,\n\
                  distances are great-circle (haversine) kilometers, and only pairs\n\
                  within the threshold are written."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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
    /// Join a vendor CSV to a PUDO CSV and write the matches.
    Join(JoinArgs),
}

#[derive(Parser)]
pub struct JoinArgs {
    /// Vendor CSV (kyc_id, kyc_status, Address, City, State, cnpj, latitude, longitude).
    #[arg(long = "vendors", value_name = "CSV")]
    pub vendors: PathBuf,

    /// PUDO CSV (latitude, longitude, ado_4w, Region, region_id, gf_lower).
    #[arg(long = "pudos", value_name = "CSV")]
    pub pudos: PathBuf,

    /// Output CSV (default: distancia_pudo_vendedor.csv next to the vendor file).
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Maximum vendor to PUDO distance in kilometers (inclusive).
    #[arg(long = "threshold-km", value_name = "KM", default_value_t = DEFAULT_THRESHOLD_KM)]
    pub threshold_km: f64,

    /// Run the join and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Do not draw the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
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
