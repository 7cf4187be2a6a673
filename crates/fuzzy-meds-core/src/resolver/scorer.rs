//! Candidate scoring.
//!
//! Scoring policies:
//! - Edit distance: `1 - d / max(1, max_distance)`
//! - Composite: matching-blocks ratio + prefix bonus (30%) + shared
//!   character bonus (20%) - length penalty (10%), clamped to [0, 1]

use std::collections::BTreeSet;

use strsim::osa_distance;

use crate::index::{Lexicon, TermId};

/// Weight of the common-prefix bonus.
const PREFIX_WEIGHT: f64 = 0.3;

/// Weight of the shared distinct character bonus.
const CHAR_WEIGHT: f64 = 0.2;

/// Weight of the relative length difference penalty.
const LENGTH_WEIGHT: f64 = 0.1;

/// Similarity between a query and indexed keys, in [0, 1].
pub trait SimilarityScorer {
    /// Similarity between a query and a single key.
    fn similarity(&self, query: &str, key: &str) -> f64;

    /// Score an interned key.
    fn score_term(&self, query: &str, term: TermId, lexicon: &Lexicon) -> f64 {
        self.similarity(query, lexicon.term(term))
    }
}

/// Confidence from optimal string alignment distance.
#[derive(Debug, Clone, Copy)]
pub struct EditDistanceScorer {
    max_distance: usize,
}

impl EditDistanceScorer {
    /// Create a scorer for a query's edit tolerance.
    pub fn new(max_distance: usize) -> Self {
        Self { max_distance }
    }

    /// Confidence of a match at `distance`; strictly decreasing until it reaches 0.
    pub fn confidence(&self, distance: usize) -> f64 {
        let scale = self.max_distance.max(1) as f64;
        (1.0 - distance as f64 / scale).max(0.0)
    }
}

impl SimilarityScorer for EditDistanceScorer {
    fn similarity(&self, query: &str, key: &str) -> f64 {
        self.confidence(osa_distance(query, key))
    }
}

/// Composite similarity, also evaluated against the candidate's base key.
#[derive(Debug, Clone, Copy)]
pub struct CompositeScorer {
    base_discount: f64,
}

impl CompositeScorer {
    /// Create a scorer; base-key scores are multiplied by `base_discount`.
    pub fn new(base_discount: f64) -> Self {
        Self { base_discount }
    }
}

impl SimilarityScorer for CompositeScorer {
    fn similarity(&self, query: &str, key: &str) -> f64 {
        composite_score(query, key)
    }

    fn score_term(&self, query: &str, term: TermId, lexicon: &Lexicon) -> f64 {
        let full = self.similarity(query, lexicon.term(term));
        match lexicon.base_of(term) {
            Some(base) => full.max(self.base_discount * self.similarity(query, lexicon.term(base))),
            None => full,
        }
    }
}

fn composite_score(query: &str, candidate: &str) -> f64 {
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let a: Vec<char> = query.chars().collect();
    let b: Vec<char> = candidate.chars().collect();

    let ratio = sequence_ratio(&a, &b);

    let min_len = a.len().min(b.len());
    let common_prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let prefix_bonus = common_prefix as f64 / min_len as f64 * PREFIX_WEIGHT;

    let query_chars: BTreeSet<char> = a.iter().copied().filter(|c| *c != ' ').collect();
    let candidate_chars: BTreeSet<char> = b.iter().copied().filter(|c| *c != ' ').collect();
    let char_bonus = if query_chars.is_empty() || candidate_chars.is_empty() {
        0.0
    } else {
        let shared = query_chars.intersection(&candidate_chars).count();
        shared as f64 / query_chars.len() as f64 * CHAR_WEIGHT
    };

    let max_len = a.len().max(b.len());
    let length_penalty = a.len().abs_diff(b.len()) as f64 / max_len as f64 * LENGTH_WEIGHT;

    (ratio + prefix_bonus + char_bonus - length_penalty).clamp(0.0, 1.0)
}

/// `2M / (|a| + |b|)` where `M` counts characters in recursively found
/// longest matching blocks.
pub fn sequence_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(a, b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block in `a[alo..ahi]` and `b[blo..bhi]`; earliest in `a`,
/// then earliest in `b`, on ties.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            current[col] = if a[i] == b[j] { previous[col - 1] + 1 } else { 0 };
            let k = current[col];
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}
