//! CLI argument definitions for finsift.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `screen` | Run the screener over a security universe |
//! | `snapshot` | Derive current indicator snapshots |
//! | `presets` | List the built-in preset catalog |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//!
//! # Examples
//!
//! ```bash
//! # Screen a universe with a filter file
//! finsift screen --securities universe.json --filters filters.json --pretty
//!
//! # Screen with a built-in preset
//! finsift screen --securities universe.json --preset oversold-reversal
//!
//! # Inspect one security's indicator snapshot
//! finsift snapshot --securities universe.json --id sec-1
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Technical-indicator screener over OHLC security universes.
#[derive(Debug, Parser)]
#[command(
    name = "finsift",
    author,
    version,
    about = "Technical-indicator and security-screening CLI"
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON object (default)
    /// - ndjson: One JSON object per line
    /// - table: ASCII table format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the screener over a security universe.
    Screen(ScreenArgs),
    /// Derive current indicator snapshots for a security universe.
    Snapshot(SnapshotArgs),
    /// List the built-in preset catalog.
    Presets,
}

#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// JSON file with the security universe (array of securities with
    /// OHLC history).
    #[arg(long)]
    pub securities: PathBuf,

    /// JSON file with filter definitions. Mutually exclusive with
    /// `--preset`.
    #[arg(long)]
    pub filters: Option<PathBuf>,

    /// Built-in preset id to instantiate instead of a filter file.
    #[arg(long)]
    pub preset: Option<String>,
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// JSON file with the security universe.
    #[arg(long)]
    pub securities: PathBuf,

    /// Restrict output to a single security id.
    #[arg(long)]
    pub id: Option<String>,
}
