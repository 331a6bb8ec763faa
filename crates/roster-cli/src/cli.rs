//! CLI argument definitions for the roster normalizer.

use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use roster_core::PipelineOptions;
use roster_ingest::DuplicateHeaderPolicy;
use roster_map::{DEFAULT_SCAN_ROWS, HeaderPolicy};

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Normalize roster exports into known record shapes",
    long_about = "Normalize uploaded roster exports into known record shapes.\n\n\
                  Reads CSV files and spreadsheet workbooks (xlsx, xlsm, xls, ods),\n\
                  matches their columns against the built-in schemas and prints\n\
                  the normalized records as JSON."
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

    /// Allow cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Logging settings from the global flags.
    ///
    /// `--log-level` beats `-v`/`-q`; either one disables `RUST_LOG`. With
    /// `--color auto`, ANSI codes are used only when logs go to a terminal.
    pub fn log_config(&self, stderr_is_terminal: bool) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && stderr_is_terminal,
        };
        LogConfig::default()
            .with_level_filter(explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()))
            .with_env_filter(explicit.is_none() && !self.verbosity.is_present())
            .with_format(self.log_format.into())
            .with_log_file(self.log_file.clone())
            .with_log_data(self.log_data)
            .with_color(ansi)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a file and print the JSON envelope.
    Read(ReadArgs),

    /// List the built-in schemas and their fields.
    Schemas,

    /// Show the schema, header row and column mapping chosen for a file.
    Inspect(InputArgs),
}

#[derive(Args)]
pub struct ReadArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Pretty-print the JSON output.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Args)]
pub struct InputArgs {
    /// Stored upload to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Name the file was uploaded under; its extension selects the decoder.
    #[arg(long = "original-name", value_name = "NAME")]
    pub original_name: Option<String>,

    /// Rows scanned for the header of a workbook sheet.
    #[arg(long = "header-scan-rows", value_name = "N", default_value_t = DEFAULT_SCAN_ROWS)]
    pub header_scan_rows: usize,

    /// Skip header candidates that lack a required column instead of failing.
    #[arg(long = "strict-headers")]
    pub strict_headers: bool,

    /// Fail CSV input when no schema has all its required columns.
    #[arg(long = "strict-records")]
    pub strict_records: bool,

    /// How repeated CSV header names are handled.
    #[arg(
        long = "duplicate-headers",
        value_enum,
        default_value = "last-wins"
    )]
    pub duplicate_headers: DuplicateHeadersArg,
}

impl InputArgs {
    pub fn pipeline_options(&self) -> PipelineOptions {
        let header_policy = if self.strict_headers {
            HeaderPolicy::RequireAll
        } else {
            HeaderPolicy::FirstMatch
        };
        PipelineOptions::default()
            .with_header_scan_rows(self.header_scan_rows)
            .with_header_policy(header_policy)
            .with_strict_records(self.strict_records)
            .with_duplicate_headers(self.duplicate_headers.into())
    }
}

/// CLI duplicate header choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicateHeadersArg {
    LastWins,
    Reject,
    Suffix,
}

impl From<DuplicateHeadersArg> for DuplicateHeaderPolicy {
    fn from(arg: DuplicateHeadersArg) -> Self {
        match arg {
            DuplicateHeadersArg::LastWins => Self::LastWins,
            DuplicateHeadersArg::Reject => Self::Reject,
            DuplicateHeadersArg::Suffix => Self::Suffix,
        }
    }
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

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
