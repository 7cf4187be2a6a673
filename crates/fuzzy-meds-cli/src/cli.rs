//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "fuzzy-meds",
    version,
    about = "Resolve misspelled medication names against a dictionary",
    long_about = "Resolve misspelled, dosage-annotated medication names against a\n\
                  dictionary of canonical names, one entry per line.\n\n\
                  Results are written to stdout as JSON; logs go to stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Resolver configuration (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Dictionary file, one medication name per line.
    #[arg(long = "dictionary", short = 'd', value_name = "PATH", global = true)]
    pub dictionary: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve one or more queries and print the full match results.
    Resolve(ResolveArgs),

    /// Resolve queries read one per line and print the matched names.
    Batch(BatchArgs),

    /// Build the index and print lexicon statistics.
    Stats,

    /// Expand a dictionary with combination splits and name variants.
    Expand(ExpandArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Queries to resolve.
    #[arg(value_name = "QUERY", required = true)]
    pub queries: Vec<String>,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Query file (default: stdin).
    #[arg(long = "input", short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Raw dictionary file.
    #[arg(long = "input", short = 'i', value_name = "PATH")]
    pub input: PathBuf,

    /// Where to write the expanded dictionary.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Only split combination products; skip dosage-free and form-free variants.
    #[arg(long = "no-variations")]
    pub no_variations: bool,
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
