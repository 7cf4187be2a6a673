//! Ready-state engine.
//!
//! [`Engine`] owns the lexicon, index set and configuration; it is immutable
//! once built and shared freely between threads. [`EngineCell`] holds at most
//! one engine and rejects requests until it has been initialized.

use std::sync::OnceLock;
use std::time::Instant;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::ResolverConfig;
use crate::index::{self, IndexSet, Lexicon};
use crate::models::{LexiconStats, MatchResult};
use crate::resolver::{Normalizer, Resolver, ResolverError, ResolverResult};

/// A fully built resolution engine.
#[derive(Debug)]
pub struct Engine {
    lexicon: Lexicon,
    index: IndexSet,
    normalizer: Normalizer,
    config: ResolverConfig,
    stats: LexiconStats,
}

impl Engine {
    /// Build an engine from dictionary entries.
    pub fn initialize<I, S>(entries: I, config: ResolverConfig) -> ResolverResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started = Instant::now();

        let mut hasher = Sha256::new();
        let mut usable = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            hasher.update(entry.as_bytes());
            hasher.update(b"\n");
            usable.push(entry.to_string());
        }

        let (lexicon, index) = index::build(&usable, &config)?;

        let stats = LexiconStats {
            entries: usable.len(),
            canonical_keys: lexicon.canonical_count(),
            dosage_keys: lexicon.dosage_count(),
            base_keys: lexicon.base_count(),
            indexed_terms: lexicon.terms().len(),
            delete_keys: index.deletes().len(),
            fingerprint: hex::encode(hasher.finalize()),
            built_at: chrono::Utc::now().to_rfc3339(),
        };

        info!(
            entries = stats.entries,
            canonical_keys = stats.canonical_keys,
            base_keys = stats.base_keys,
            delete_keys = stats.delete_keys,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Index build complete"
        );

        Ok(Self {
            lexicon,
            index,
            normalizer: Normalizer::new(),
            config,
            stats,
        })
    }

    /// Resolver borrowing this engine's state.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.lexicon, &self.index, &self.normalizer, &self.config)
    }

    pub fn resolve(&self, query: &str) -> MatchResult {
        self.resolver().resolve(query)
    }

    pub fn resolve_batch<S: AsRef<str>>(&self, queries: &[S]) -> Vec<String> {
        self.resolver().resolve_batch(queries)
    }

    pub fn stats(&self) -> &LexiconStats {
        &self.stats
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

/// Initialize-once holder for an [`Engine`].
///
/// The build runs outside the cell; readers see either nothing or the
/// complete engine.
#[derive(Debug, Default)]
pub struct EngineCell {
    engine: OnceLock<Engine>,
}

impl EngineCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and publish the engine.
    pub fn initialize<I, S>(&self, entries: I, config: ResolverConfig) -> ResolverResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.is_initialized() {
            return Err(ResolverError::AlreadyInitialized);
        }
        let engine = Engine::initialize(entries, config)?;
        self.engine
            .set(engine)
            .map_err(|_| ResolverError::AlreadyInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.get().is_some()
    }

    /// The engine, or [`ResolverError::NotInitialized`].
    pub fn get(&self) -> ResolverResult<&Engine> {
        self.engine.get().ok_or(ResolverError::NotInitialized)
    }

    pub fn resolve(&self, query: &str) -> ResolverResult<MatchResult> {
        Ok(self.get()?.resolve(query))
    }

    pub fn resolve_batch<S: AsRef<str>>(&self, queries: &[S]) -> ResolverResult<Vec<String>> {
        Ok(self.get()?.resolve_batch(queries))
    }

    pub fn stats(&self) -> ResolverResult<LexiconStats> {
        Ok(self.get()?.stats().clone())
    }
}
