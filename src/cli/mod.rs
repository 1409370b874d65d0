//! Command-line parsing for the `tg` binary.
//!
//! Parsing and dispatch live apart from the validation code; `app` turns
//! these structs into library calls.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tg", version, about = "Typed configs and contracted data readers for tabular pipelines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a configuration record after applying `--key=value` overrides.
    Config(ConfigArgs),
    /// Read a CSV through the column contract and summarise the result.
    Read(ReadArgs),
    /// Download a file into the local dataset cache (no-op if cached).
    Fetch(FetchArgs),
}

/// Which configuration record to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Train,
    Model,
}

#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Configuration record to start from (its declared defaults).
    #[arg(long, value_enum, default_value_t = Preset::Train)]
    pub preset: Preset,

    /// Print JSON instead of the aligned listing.
    #[arg(long)]
    pub json: bool,

    /// Field overrides, each exactly `--<field>=<value>`.
    #[arg(
        value_name = "--KEY=VALUE",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub overrides: Vec<String>,
}

#[derive(Debug, Parser)]
pub struct ReadArgs {
    /// CSV file to read.
    #[arg(value_name = "CSV")]
    pub path: PathBuf,

    /// Columns that must be present and numeric (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub numerical: Vec<String>,

    /// Columns that must be present; kept as categorical text (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub categorical: Vec<String>,

    /// Field delimiter.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Number of leading rows to print.
    #[arg(long, default_value_t = 5)]
    pub head: usize,
}

#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// Source URL.
    #[arg(long)]
    pub url: String,

    /// Destination file name inside the cache.
    #[arg(long)]
    pub name: String,

    /// Cache root (defaults to `TG_DATA_DIR`, then `./data`).
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}
