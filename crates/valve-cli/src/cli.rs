//! CLI argument definitions for the dashboard generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "valve-dashboard",
    version,
    about = "Heart-valve KPI dashboard - procedure list to report",
    long_about = "Compute the heart-valve KPI dashboard from the procedure list.\n\n\
                  Reads the 'Daten' sheet (CSV export), classifies procedures,\n\
                  compares case numbers, length of stay, device mix and\n\
                  complication rates against targets, and writes JSON/CSV reports."
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

    /// Include procedure labels and team names in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the dashboard and write report files.
    Report(ReportArgs),

    /// List classification rules and monthly targets.
    Categories(CategoriesArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Sheet CSV file, or a directory holding one CSV per workbook sheet.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Report year (overrides the config file).
    #[arg(long = "year")]
    pub year: Option<i32>,

    /// TOML file with targets, benchmarks and year spans.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Sheet holding the procedure rows.
    #[arg(long = "sheet", default_value = valve_ingest::DEFAULT_SHEET)]
    pub sheet: String,

    /// Rows above the header row.
    #[arg(long = "skip-rows", default_value_t = valve_ingest::DEFAULT_HEADER_SKIP)]
    pub skip_rows: usize,

    /// Workbook password.
    #[arg(long = "password")]
    pub password: Option<String>,

    /// Output directory (default: `output/` next to INPUT).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report files to write.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,

    /// Compute and summarize without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CategoriesArgs {
    /// TOML file whose monthly targets are shown.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Csv,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
