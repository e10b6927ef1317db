//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mapcheck",
    version,
    about = "Validate JSON/XML documents against a class-shaped target",
    long_about = "Check whether a JSON or XML document is structurally and\n\
                  type-compatible with a target shape extracted from a\n\
                  class-like definition, with per-field diagnostics and\n\
                  fuzzy name suggestions."
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
    /// Validate a document against a target shape.
    Check(CheckArgs),

    /// Print the fields parsed from a target-shape definition.
    Shape(ShapeArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the JSON or XML document to validate.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Path to the class-like shape definition text.
    #[arg(value_name = "SHAPE")]
    pub shape: PathBuf,

    /// Document format (auto sniffs XML by a leading '<').
    #[arg(long = "format", value_enum, default_value = "auto")]
    pub format: FormatArg,

    /// Treat the document root as a collection and validate its first element.
    #[arg(long = "collection")]
    pub collection: bool,

    /// Emit the report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ShapeArgs {
    /// Path to the class-like shape definition text.
    #[arg(value_name = "SHAPE")]
    pub shape: PathBuf,
}

/// Document format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Auto,
    Json,
    Xml,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
