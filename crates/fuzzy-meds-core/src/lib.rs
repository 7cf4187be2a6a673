//! Fuzzy-Meds Core Library
//!
//! Resolves misspelled, dosage-annotated medication names against a large
//! static dictionary.
//!
//! # Architecture
//!
//! ```text
//!  dictionary ──► Normalizer ──► Lexicon ──► IndexSet
//!                                   │    (deletes, soundex, words, first char)
//!                                   │           │
//!  query ──► Normalizer ──► lookup key ──► Candidate Generator
//!                                               │
//!                                            Scorer
//!                                   (edit distance | composite)
//!                                               │
//!                                            Resolver
//!                              ┌────────────────┼────────────────┐
//!                              ▼                ▼                ▼
//!                        full name         base name        unclassified
//!                          match        mapped to full         match
//! ```
//!
//! # Core Principle
//!
//! **A low-confidence guess is worse than no suggestion.** Matches below the
//! confidence threshold are reported as no match.
//!
//! # Modules
//!
//! - [`index`]: Lexicon and retrieval indexes
//! - [`resolver`]: Normalizer, candidate generation, scoring, resolution
//! - [`engine`]: Ready-state engine and initialize-once cell
//! - [`models`]: Result types
//! - [`config`]: Resolver configuration
//! - [`dictionary`]: Dictionary loading and variant expansion

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod index;
pub mod models;
pub mod resolver;

// Re-export commonly used types
pub use config::{ResolverConfig, ScoringPolicy};
pub use engine::{Engine, EngineCell};
pub use models::{Alternative, LexiconStats, MatchMethod, MatchResult};
pub use resolver::{Normalizer, Resolver, ResolverError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::path::Path;
use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FuzzyMedsError {
    #[error("Not initialized: {0}")]
    NotInitialized(String),

    #[error("Empty dictionary: {0}")]
    EmptyDictionary(String),

    #[error("Already initialized: {0}")]
    AlreadyInitialized(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<ResolverError> for FuzzyMedsError {
    fn from(e: ResolverError) -> Self {
        match e {
            ResolverError::NotInitialized => FuzzyMedsError::NotInitialized(e.to_string()),
            ResolverError::EmptyDictionary => FuzzyMedsError::EmptyDictionary(e.to_string()),
            ResolverError::AlreadyInitialized => FuzzyMedsError::AlreadyInitialized(e.to_string()),
        }
    }
}

impl From<config::ConfigError> for FuzzyMedsError {
    fn from(e: config::ConfigError) -> Self {
        FuzzyMedsError::InvalidConfig(e.to_string())
    }
}

impl From<dictionary::DictionaryError> for FuzzyMedsError {
    fn from(e: dictionary::DictionaryError) -> Self {
        match e {
            dictionary::DictionaryError::Empty { .. } => FuzzyMedsError::EmptyDictionary(e.to_string()),
            dictionary::DictionaryError::Io { .. } => FuzzyMedsError::Io(e.to_string()),
        }
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an uninitialized core with the default configuration.
#[uniffi::export]
pub fn create_core() -> Arc<FuzzyMedsCore> {
    Arc::new(FuzzyMedsCore::new(ResolverConfig::default()))
}

/// Create an uninitialized core from a TOML configuration document.
#[uniffi::export]
pub fn create_core_with_config(toml: String) -> Result<Arc<FuzzyMedsCore>, FuzzyMedsError> {
    let config = ResolverConfig::from_toml_str(&toml)?;
    Ok(Arc::new(FuzzyMedsCore::new(config)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe resolution service for FFI.
///
/// Every resolve call fails with `NotInitialized` until a dictionary has been
/// loaded.
#[derive(uniffi::Object)]
pub struct FuzzyMedsCore {
    config: ResolverConfig,
    engine: EngineCell,
}

impl FuzzyMedsCore {
    fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            engine: EngineCell::new(),
        }
    }
}

#[uniffi::export]
impl FuzzyMedsCore {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Build the index from dictionary entries.
    pub fn initialize(&self, entries: Vec<String>) -> Result<FfiLexiconStats, FuzzyMedsError> {
        self.engine.initialize(&entries, self.config.clone())?;
        Ok(self.engine.stats()?.into())
    }

    /// Build the index from a dictionary file, one entry per line.
    pub fn initialize_from_file(&self, path: String) -> Result<FfiLexiconStats, FuzzyMedsError> {
        let entries = dictionary::load_dictionary(Path::new(&path))?;
        self.initialize(entries)
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_initialized()
    }

    pub fn stats(&self) -> Result<FfiLexiconStats, FuzzyMedsError> {
        Ok(self.engine.stats()?.into())
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve a single query. A missing query behaves as an empty one.
    pub fn resolve(&self, query: Option<String>) -> Result<FfiMatchResult, FuzzyMedsError> {
        let result = self.engine.resolve(query.as_deref().unwrap_or_default())?;
        Ok(result.into())
    }

    /// Resolve queries in order; unmatched entries are empty strings.
    pub fn resolve_batch(&self, queries: Vec<Option<String>>) -> Result<Vec<String>, FuzzyMedsError> {
        let queries: Vec<&str> = queries.iter().map(|q| q.as_deref().unwrap_or_default()).collect();
        Ok(self.engine.resolve_batch(&queries)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe match result.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiMatchResult {
    pub term: String,
    pub confidence: f64,
    pub method: String,
    pub alternatives: Vec<FfiAlternative>,
}

impl From<MatchResult> for FfiMatchResult {
    fn from(result: MatchResult) -> Self {
        Self {
            term: result.term,
            confidence: result.confidence,
            method: result.method.as_str().to_string(),
            alternatives: result.alternatives.into_iter().map(|a| a.into()).collect(),
        }
    }
}

/// FFI-safe alternative.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAlternative {
    pub term: String,
    pub confidence: f64,
}

impl From<Alternative> for FfiAlternative {
    fn from(alternative: Alternative) -> Self {
        Self {
            term: alternative.term,
            confidence: alternative.confidence,
        }
    }
}

/// FFI-safe lexicon statistics.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiLexiconStats {
    pub entries: u64,
    pub canonical_keys: u64,
    pub dosage_keys: u64,
    pub base_keys: u64,
    pub indexed_terms: u64,
    pub delete_keys: u64,
    pub fingerprint: String,
    pub built_at: String,
}

impl From<LexiconStats> for FfiLexiconStats {
    fn from(stats: LexiconStats) -> Self {
        Self {
            entries: stats.entries as u64,
            canonical_keys: stats.canonical_keys as u64,
            dosage_keys: stats.dosage_keys as u64,
            base_keys: stats.base_keys as u64,
            indexed_terms: stats.indexed_terms as u64,
            delete_keys: stats.delete_keys as u64,
            fingerprint: stats.fingerprint,
            built_at: stats.built_at,
        }
    }
}
