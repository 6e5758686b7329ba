use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the tpa binary.
#[derive(Parser, Debug, Default)]
#[command(
    name = "tpa",
    version,
    about = "Reports direct reads of the system clock in C# sources"
)]
pub struct CliArgs {
    /// Source files or directories to analyze. Defaults to the working directory.
    pub paths: Vec<PathBuf>,

    /// Path to a tpa.json configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Built-in reference set to compile against.
    #[arg(short = 'r', long)]
    pub reference: Option<String>,

    /// Additional JSON metadata reference (repeatable).
    #[arg(long = "metadata", value_name = "FILE")]
    pub metadata: Vec<PathBuf>,

    /// Glob of paths to skip (repeatable).
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only report DateTimeOffset.Now and DateTimeOffset.UtcNow, not every DateTimeOffset
    /// property or every property named Now/UtcNow.
    #[arg(long = "strict-offset-accessors")]
    pub strict_offset_accessors: bool,

    /// Analyze generated files too.
    #[arg(long = "include-generated")]
    pub include_generated: bool,

    /// Rewrite flagged accesses through the TimeProvider in scope.
    #[arg(long)]
    pub fix: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Do not print the summary line.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
