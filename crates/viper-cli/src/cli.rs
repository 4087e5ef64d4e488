//! CLI argument definitions for the preprocessing tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use viper_model::Language;

#[derive(Parser)]
#[command(
    name = "viper",
    version,
    about = "Immunization record preprocessor - Normalize registry exports into notice-ready artifacts",
    long_about = "Normalize a school immunization registry export into a validated JSON artifact.\n\n\
                  Maps export columns onto the canonical schema, cleans and sequences client\n\
                  records, and reports data-quality warnings alongside the artifact."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Preprocess a registry export into a client artifact.
    Preprocess(PreprocessArgs),

    /// List supported notice languages.
    Languages,
}

#[derive(Parser)]
pub struct PreprocessArgs {
    /// Path to the registry export (CSV or Excel).
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Language for notice-facing strings in the artifact.
    #[arg(long = "language", value_enum, default_value = "en")]
    pub language: LanguageArg,

    /// Reference data directory (default: ./config).
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Output directory for the artifact (default: ./output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run identifier embedded in the artifact filename
    /// (default: UTC timestamp, YYYYMMDDTHHMMSS).
    #[arg(long = "run-id", value_name = "ID")]
    pub run_id: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LanguageArg {
    En,
    Fr,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::En,
            LanguageArg::Fr => Language::Fr,
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
