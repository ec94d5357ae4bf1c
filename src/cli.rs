//! Filepath: src/cli.rs

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Shared application context for global flags.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
}

#[derive(Parser)]
#[command(name = "linediff")]
#[command(about = "A line-level diff engine with configurable equivalence rules")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress bars and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two files, or two directories recursively
    Diff(DiffArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Normal,
    Unified,
    HtmlNormal,
    HtmlUnified,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// The "old" file or directory
    pub old: PathBuf,

    /// The "new" file or directory
    pub new: PathBuf,

    /// Ignore case differences when comparing lines
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Treat runs of whitespace as equivalent
    #[arg(short = 'b', long)]
    pub ignore_space_change: bool,

    /// Ignore all whitespace when comparing lines
    #[arg(short = 'w', long)]
    pub ignore_all_space: bool,

    /// Treat blank lines as insignificant
    #[arg(short = 'B', long)]
    pub ignore_blank_lines: bool,

    /// Compare by Unicode code point instead of by byte
    #[arg(long)]
    pub unicode: bool,

    /// Number of context lines to keep around each change
    #[arg(short = 'U', long)]
    pub context: Option<usize>,

    /// Report rendering
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Recurse into directories; required when both paths are directories
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Worker-pool size (default: available parallelism)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Additional glob to exclude from directory-mode traversal (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted, the completion script is printed to
    /// stdout regardless of `--stdout`
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
