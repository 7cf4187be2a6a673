//! Resolution results.

use serde::{Deserialize, Serialize};

use crate::index::TermId;

/// How the winning key was mapped to a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// The key is a full (canonical or dosage) key of a dictionary name
    DirectFullNameMatch,
    /// The key is a base name; the first dictionary name sharing it is returned
    BaseNameMappedToFull,
    /// The key maps to no dictionary name and is returned verbatim
    UnclassifiedMatch,
    /// No candidate passed the confidence threshold
    NoMatchFound,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::DirectFullNameMatch => "direct_full_name_match",
            MatchMethod::BaseNameMappedToFull => "base_name_mapped_to_full",
            MatchMethod::UnclassifiedMatch => "unclassified_match",
            MatchMethod::NoMatchFound => "no_match_found",
        }
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored key, scoped to one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub term: TermId,
    pub confidence: f64,
}

/// A runner-up display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alternative {
    pub term: String,
    pub confidence: f64,
}

/// Outcome of resolving one query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    /// Dictionary display name, or empty when nothing matched
    pub term: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    pub method: MatchMethod,
    /// Distinct runners-up, highest confidence first
    pub alternatives: Vec<Alternative>,
}

impl MatchResult {
    /// The result for a rejected or empty query.
    pub fn empty() -> Self {
        Self {
            term: String::new(),
            confidence: 0.0,
            method: MatchMethod::NoMatchFound,
            alternatives: Vec::new(),
        }
    }

    /// Whether a dictionary name was accepted.
    pub fn is_match(&self) -> bool {
        !self.term.is_empty()
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::empty()
    }
}
