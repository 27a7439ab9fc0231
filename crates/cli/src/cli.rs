//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};
use contracts::MatchMode;
use std::path::PathBuf;

/// logsplit - split a log file into primary and secondary streams
#[derive(Parser, Debug)]
#[command(
    name = "logsplit",
    author,
    version,
    about = "Concurrent log line splitter",
    long_about = "Splits a newline-delimited file into two outputs next to it.\n\n\
                  Lines containing the marker go to <INPUT><secondary-suffix>, all \n\
                  other lines go to <INPUT><primary-suffix>. Order is preserved \n\
                  within each output."
)]
pub struct Cli {
    /// Input file of newline-delimited text
    pub input: PathBuf,

    /// Configuration file (TOML or JSON); flags below override it
    #[arg(short, long, env = "LOGSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Marker selecting the secondary output [default: ERR]
    #[arg(short, long, env = "LOGSPLIT_MARKER")]
    pub marker: Option<String>,

    /// How the marker is matched [default: contains]
    #[arg(long, value_enum)]
    pub match_mode: Option<MatchModeArg>,

    /// Suffix of the primary output [default: .stdout]
    #[arg(long, allow_hyphen_values = true)]
    pub primary_suffix: Option<String>,

    /// Suffix of the secondary output [default: .stderr]
    #[arg(long, allow_hyphen_values = true)]
    pub secondary_suffix: Option<String>,

    /// Capacity of each category channel [default: 1024]
    #[arg(long, env = "LOGSPLIT_QUEUE_CAPACITY")]
    pub queue_capacity: Option<usize>,

    /// Exit non-zero if any line could not be written
    #[arg(long)]
    pub strict_writes: bool,

    /// Resolve configuration and print the plan without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, env = "LOGSPLIT_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        env = "LOGSPLIT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

/// Marker match mode
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchModeArg {
    /// Marker anywhere in the line
    Contains,
    /// Line starts with the marker
    Prefix,
}

impl From<MatchModeArg> for MatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::Contains => MatchMode::Contains,
            MatchModeArg::Prefix => MatchMode::Prefix,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
