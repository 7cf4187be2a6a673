//! Symmetric-delete index for bounded edit-distance lookup.
//!
//! Every term contributes all strings reachable by deleting up to
//! `max_distance` characters from its first `prefix_length` characters.
//! A query generates the same deletes from its own prefix; any shared delete
//! yields a candidate, which is then verified with the optimal string
//! alignment distance over the full strings.

use std::collections::{HashMap, HashSet};

use strsim::osa_distance;

use super::TermId;

/// A term within edit distance of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub term: TermId,
    pub distance: usize,
}

/// Deletion-neighbourhood index over term prefixes.
#[derive(Debug, Default)]
pub struct DeleteIndex {
    max_distance: usize,
    prefix_length: usize,
    deletes: HashMap<String, Vec<TermId>>,
}

impl DeleteIndex {
    pub fn new(max_distance: usize, prefix_length: usize) -> Self {
        Self {
            max_distance,
            prefix_length,
            deletes: HashMap::new(),
        }
    }

    /// Largest distance this index can answer.
    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Number of distinct delete strings.
    pub fn len(&self) -> usize {
        self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
    }

    /// Register a term under every delete of its prefix.
    pub fn insert(&mut self, term: TermId, key: &str) {
        let prefix: Vec<char> = key.chars().take(self.prefix_length).collect();
        for delete in deletes_of(&prefix, self.max_distance) {
            let ids = self.deletes.entry(delete).or_default();
            if ids.last() != Some(&term) {
                ids.push(term);
            }
        }
    }

    /// Terms within `max_distance` of `query`, closest first, then by insertion order.
    ///
    /// `terms` is the term table the ids index into.
    pub fn lookup(&self, query: &str, max_distance: usize, terms: &[String]) -> Vec<Suggestion> {
        let max_distance = max_distance.min(self.max_distance);
        let query_len = query.chars().count();
        let prefix: Vec<char> = query.chars().take(self.prefix_length).collect();

        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        for delete in deletes_of(&prefix, max_distance) {
            let Some(ids) = self.deletes.get(&delete) else {
                continue;
            };
            for &id in ids {
                if !seen.insert(id) {
                    continue;
                }
                let Some(candidate) = terms.get(id as usize) else {
                    continue;
                };
                if candidate.chars().count().abs_diff(query_len) > max_distance {
                    continue;
                }
                let distance = osa_distance(query, candidate);
                if distance <= max_distance {
                    suggestions.push(Suggestion { term: id, distance });
                }
            }
        }

        suggestions.sort_by_key(|s| (s.distance, s.term));
        suggestions
    }
}

/// All strings obtained by deleting up to `depth` characters, the input included.
fn deletes_of(chars: &[char], depth: usize) -> HashSet<String> {
    let mut all = HashSet::new();
    all.insert(chars.iter().collect::<String>());

    let mut frontier: HashSet<Vec<char>> = HashSet::new();
    frontier.insert(chars.to_vec());

    for _ in 0..depth {
        let mut next = HashSet::new();
        for word in &frontier {
            for i in 0..word.len() {
                let mut shorter = word.clone();
                shorter.remove(i);
                if all.insert(shorter.iter().collect()) {
                    next.insert(shorter);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    all
}
