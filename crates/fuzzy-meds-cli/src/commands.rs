//! Subcommand implementations.
//!
//! Each command returns the text it prints so it can be tested without a
//! process boundary.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use fuzzy_meds_core::dictionary::{self, ExpandOptions, VariantExpander};
use fuzzy_meds_core::{Engine, MatchResult, ResolverConfig};
use tracing::info;

use crate::cli::{BatchArgs, Cli, Command, ExpandArgs, ResolveArgs};

/// Run the selected subcommand, returning its stdout output.
pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Resolve(args) => {
            let engine = load_engine(cli)?;
            run_resolve(&engine, args)
        }
        Command::Batch(args) => {
            let engine = load_engine(cli)?;
            run_batch(&engine, args)
        }
        Command::Stats => {
            let engine = load_engine(cli)?;
            serde_json::to_string_pretty(engine.stats()).context("serialize stats")
        }
        Command::Expand(args) => run_expand(args),
    }
}

/// Load the configuration and dictionary named on the command line and build the engine.
pub fn load_engine(cli: &Cli) -> Result<Engine> {
    let config = match &cli.config {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => ResolverConfig::default(),
    };
    let path = cli
        .dictionary
        .as_deref()
        .context("--dictionary is required for this command")?;

    build_engine(path, config)
}

/// Build an engine from a dictionary file.
pub fn build_engine(path: &Path, config: ResolverConfig) -> Result<Engine> {
    let entries = dictionary::load_dictionary(path)?;
    Engine::initialize(&entries, config)
        .with_context(|| format!("build index from {}", path.display()))
}

pub fn run_resolve(engine: &Engine, args: &ResolveArgs) -> Result<String> {
    let results: Vec<MatchResult> = args.queries.iter().map(|q| engine.resolve(q)).collect();
    serde_json::to_string_pretty(&results).context("serialize match results")
}

pub fn run_batch(engine: &Engine, args: &BatchArgs) -> Result<String> {
    let queries = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            read_queries(BufReader::new(file))?
        }
        None => read_queries(io::stdin().lock())?,
    };

    let terms = engine.resolve_batch(&queries);
    info!(
        queries = queries.len(),
        matched = terms.iter().filter(|t| !t.is_empty()).count(),
        "Batch resolved"
    );
    serde_json::to_string_pretty(&terms).context("serialize batch results")
}

/// One query per line; blank lines are kept so output stays aligned with input.
pub fn read_queries<R: BufRead>(reader: R) -> Result<Vec<String>> {
    reader
        .lines()
        .map(|line| {
            line.map(|l| l.trim_end_matches('\r').to_string())
                .context("read query")
        })
        .collect()
}

pub fn run_expand(args: &ExpandArgs) -> Result<String> {
    let entries = dictionary::load_dictionary(&args.input)?;
    let expanded = VariantExpander::new().expand(
        &entries,
        ExpandOptions {
            variations: !args.no_variations,
        },
    );
    dictionary::write_dictionary(&args.output, &expanded)?;

    info!(
        input = entries.len(),
        output = expanded.len(),
        path = %args.output.display(),
        "Dictionary expanded"
    );
    Ok(summary(&args.output, entries.len(), expanded.len()))
}

fn summary(output: &Path, input: usize, expanded: usize) -> String {
    format!("Wrote {} entries ({} read) to {}", expanded, input, output.display())
}
