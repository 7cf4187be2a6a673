//! Medication name resolver.
//!
//! Pipeline: Normalization → Candidate Generation → Scoring → Acceptance
//!
//! States: `NoQuery → Normalized → Scored → {Accepted | Rejected}`.

mod candidates;
mod normalizer;
mod scorer;

pub use candidates::*;
pub use normalizer::*;
pub use scorer::*;

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{ResolverConfig, ScoringPolicy};
use crate::index::{IndexError, IndexSet, KeyClass, Lexicon, TermId};
use crate::models::{Alternative, Candidate, MatchMethod, MatchResult};

/// Resolver errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("Dictionary has no usable entries")]
    EmptyDictionary,

    #[error("Resolver is not initialized")]
    NotInitialized,

    #[error("Resolver is already initialized")]
    AlreadyInitialized,
}

impl From<IndexError> for ResolverError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::EmptyDictionary => ResolverError::EmptyDictionary,
        }
    }
}

pub type ResolverResult<T> = Result<T, ResolverError>;

/// A normalized query and the key it is looked up under.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Lookup {
    key: String,
    has_dosage: bool,
}

/// Ranked candidates from one scoring path.
#[derive(Debug)]
struct Scored {
    candidates: Vec<Candidate>,
    /// Acceptance threshold of the path that produced them
    threshold: f64,
}

impl Scored {
    fn accepts(&self) -> bool {
        self.candidates
            .first()
            .is_some_and(|c| c.confidence >= self.threshold)
    }
}

/// Resolver over a built lexicon and index set.
pub struct Resolver<'a> {
    lexicon: &'a Lexicon,
    normalizer: &'a Normalizer,
    config: &'a ResolverConfig,
    candidates: CandidateGenerator<'a>,
}

impl<'a> Resolver<'a> {
    /// Create a new resolver.
    pub fn new(
        lexicon: &'a Lexicon,
        index: &'a IndexSet,
        normalizer: &'a Normalizer,
        config: &'a ResolverConfig,
    ) -> Self {
        Self {
            lexicon,
            normalizer,
            config,
            candidates: CandidateGenerator::new(lexicon, index, config),
        }
    }

    /// Resolve a query to a dictionary name.
    ///
    /// Never fails: empty input and low-confidence matches give [`MatchResult::empty`].
    pub fn resolve(&self, query: &str) -> MatchResult {
        let Some(lookup) = self.lookup(query) else {
            return MatchResult::empty();
        };

        let scored = self.score(&lookup);
        let result = self.accept(&scored);

        debug!(
            key = %lookup.key,
            has_dosage = lookup.has_dosage,
            candidates = scored.candidates.len(),
            term = %result.term,
            confidence = result.confidence,
            method = %result.method,
            "Resolved query"
        );

        result
    }

    /// Resolve each query independently; unmatched queries yield an empty string.
    pub fn resolve_batch<S: AsRef<str>>(&self, queries: &[S]) -> Vec<String> {
        queries
            .iter()
            .map(|q| self.resolve(q.as_ref()).term)
            .collect()
    }

    /// Get the normalizer for direct access.
    pub fn normalizer(&self) -> &Normalizer {
        self.normalizer
    }

    /// Get the candidate generator for direct access.
    pub fn candidates(&self) -> &CandidateGenerator<'a> {
        &self.candidates
    }

    /// `NoQuery → Normalized`: dosage queries keep their full key, others use the base key.
    fn lookup(&self, query: &str) -> Option<Lookup> {
        let normalized = self.normalizer.normalize(query);
        if normalized.is_empty() {
            return None;
        }

        let has_dosage = self.normalizer.has_dosage(query);
        let key = if has_dosage {
            normalized
        } else {
            let base = self.normalizer.base_name(query);
            if base.is_empty() {
                normalized
            } else {
                base
            }
        };

        Some(Lookup { key, has_dosage })
    }

    /// `Normalized → Scored`
    fn score(&self, lookup: &Lookup) -> Scored {
        match self.config.scoring {
            ScoringPolicy::EditDistance => self.score_edit_distance(&lookup.key),
            ScoringPolicy::Composite => self.score_composite(&lookup.key),
            ScoringPolicy::Auto => {
                let scored = self.score_edit_distance(&lookup.key);
                if lookup.has_dosage || scored.accepts() {
                    scored
                } else {
                    trace!(key = %lookup.key, "Falling back to composite scoring");
                    self.score_composite(&lookup.key)
                }
            }
        }
    }

    fn score_edit_distance(&self, key: &str) -> Scored {
        let scorer = EditDistanceScorer::new(self.candidates.distance_for(key));
        let candidates = self
            .candidates
            .edit_distance_candidates(key)
            .into_iter()
            .map(|s| Candidate {
                term: s.term,
                confidence: scorer.confidence(s.distance),
            })
            .collect();

        Scored {
            candidates,
            threshold: self.config.min_confidence,
        }
    }

    fn score_composite(&self, key: &str) -> Scored {
        let scorer = CompositeScorer::new(self.config.base_discount);
        let pool = self.candidates.generate(key, RetrievalStrategy::HeuristicPool);
        Scored {
            candidates: rank(&scorer, key, pool, self.lexicon),
            threshold: self.config.composite_min_confidence,
        }
    }

    /// `Scored → Accepted | Rejected`
    fn accept(&self, scored: &Scored) -> MatchResult {
        let Some(winner) = scored.candidates.first() else {
            return MatchResult::empty();
        };
        if winner.confidence < scored.threshold {
            return MatchResult::empty();
        }

        let (term, method) = self.display(winner.term);

        let mut seen = HashSet::new();
        seen.insert(term.to_lowercase());

        let mut alternatives: Vec<Alternative> = Vec::new();
        for candidate in scored.candidates.iter().skip(1).take(self.config.max_alternatives) {
            if candidate.confidence < scored.threshold {
                trace!(
                    key = %self.lexicon.term(candidate.term),
                    confidence = candidate.confidence,
                    "Alternative below threshold"
                );
                continue;
            }
            let (name, _) = self.display(candidate.term);
            if !seen.insert(name.to_lowercase()) {
                trace!(term = %name, "Duplicate alternative");
                continue;
            }
            alternatives.push(Alternative {
                term: name.to_string(),
                confidence: candidate.confidence,
            });
        }
        alternatives.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        MatchResult {
            term: term.to_string(),
            confidence: winner.confidence,
            method,
            alternatives,
        }
    }

    /// Display name and method for a matched key.
    fn display(&self, term: TermId) -> (&'a str, MatchMethod) {
        match self.lexicon.classify_id(term) {
            KeyClass::ExactMatch(name) => (name, MatchMethod::DirectFullNameMatch),
            KeyClass::BaseAlias(names) => match names.first() {
                Some(first) => (first.as_str(), MatchMethod::BaseNameMappedToFull),
                None => (self.lexicon.term(term), MatchMethod::UnclassifiedMatch),
            },
            KeyClass::Unclassified => (self.lexicon.term(term), MatchMethod::UnclassifiedMatch),
        }
    }
}

/// Score every pooled key; highest first, insertion order on ties.
pub fn rank<S, I>(scorer: &S, query: &str, pool: I, lexicon: &Lexicon) -> Vec<Candidate>
where
    S: SimilarityScorer + ?Sized,
    I: IntoIterator<Item = TermId>,
{
    let mut candidates: Vec<Candidate> = pool
        .into_iter()
        .map(|term| Candidate {
            term,
            confidence: scorer.score_term(query, term, lexicon),
        })
        .collect();
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence).then(a.term.cmp(&b.term)));
    candidates
}
