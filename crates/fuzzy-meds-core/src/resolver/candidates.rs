//! Candidate generation.
//!
//! Two retrieval strategies over the same [`IndexSet`]:
//! - Edit distance: deletion-index lookup, tolerance scaled with query length
//! - Heuristic pool: first character, Soundex, word postings and fuzzy token
//!   expansion, widened and finally replaced by a full scan on small pools

use std::collections::BTreeSet;

use crate::config::ResolverConfig;
use crate::index::{soundex, IndexSet, Lexicon, Suggestion, TermId};

/// Minimum token length (exclusive) for posting lookups.
const MIN_TOKEN_LEN: usize = 2;

/// Largest length difference for fuzzy token expansion.
const TOKEN_EXPANSION_SLACK: usize = 2;

/// First-character neighbourhood added when widening a pool.
const WIDEN_RADIUS: u32 = 2;

/// Edit tolerance for a query of `len` characters.
pub fn max_edit_distance(len: usize) -> usize {
    match len {
        0..=5 => 1,
        6..=8 => 2,
        9..=12 => 3,
        _ => 4,
    }
}

/// Retrieval strategy for [`CandidateGenerator::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalStrategy {
    EditDistance,
    HeuristicPool,
}

/// Candidate generator over a built lexicon and index set.
pub struct CandidateGenerator<'a> {
    lexicon: &'a Lexicon,
    index: &'a IndexSet,
    config: &'a ResolverConfig,
}

impl<'a> CandidateGenerator<'a> {
    /// Create a new candidate generator.
    pub fn new(lexicon: &'a Lexicon, index: &'a IndexSet, config: &'a ResolverConfig) -> Self {
        Self {
            lexicon,
            index,
            config,
        }
    }

    /// Edit tolerance for this query, capped at the index maximum.
    pub fn distance_for(&self, query: &str) -> usize {
        max_edit_distance(query.chars().count()).min(self.index.deletes().max_distance())
    }

    /// Keys within the query's edit tolerance, closest first.
    pub fn edit_distance_candidates(&self, query: &str) -> Vec<Suggestion> {
        if query.is_empty() {
            return Vec::new();
        }
        self.index
            .deletes()
            .lookup(query, self.distance_for(query), self.lexicon.terms())
    }

    /// Canonical keys worth scoring against the query.
    pub fn heuristic_pool(&self, query: &str) -> BTreeSet<TermId> {
        let mut pool = BTreeSet::new();
        let Some(first) = query.chars().next() else {
            return pool;
        };

        pool.extend(self.index.first_char(first));

        let words: Vec<&str> = query.split_whitespace().collect();
        if let Some(first_word) = words.first() {
            pool.extend(self.index.phonetic(&soundex(first_word)));
        }

        for word in words.iter().filter(|w| w.chars().count() > MIN_TOKEN_LEN) {
            pool.extend(self.index.postings(word));

            let word_len = word.chars().count();
            for (token, ids) in self.index.tokens() {
                let related = token.contains(word) || word.contains(token);
                if related && token.chars().count().abs_diff(word_len) <= TOKEN_EXPANSION_SLACK {
                    pool.extend(ids);
                }
            }
        }

        if pool.len() < self.config.pool_widen_below {
            let code = first as u32;
            let neighbours = code.saturating_sub(WIDEN_RADIUS)..=code.saturating_add(WIDEN_RADIUS);
            for c in neighbours.filter_map(char::from_u32) {
                pool.extend(self.index.first_char(c));
            }
        }

        if pool.len() < self.config.pool_full_scan_below {
            pool.extend(self.lexicon.canonical_keys());
        }

        pool
    }

    /// Candidate keys for a strategy.
    pub fn generate(&self, query: &str, strategy: RetrievalStrategy) -> BTreeSet<TermId> {
        match strategy {
            RetrievalStrategy::EditDistance => self
                .edit_distance_candidates(query)
                .into_iter()
                .map(|s| s.term)
                .collect(),
            RetrievalStrategy::HeuristicPool => self.heuristic_pool(query),
        }
    }
}
