//! Lexicon statistics.

use serde::{Deserialize, Serialize};

/// Summary of a built engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexiconStats {
    /// Dictionary entries that produced a non-empty canonical key
    pub entries: usize,
    /// Distinct canonical keys
    pub canonical_keys: usize,
    /// Distinct dosage keys
    pub dosage_keys: usize,
    /// Distinct base keys
    pub base_keys: usize,
    /// Interned keys of every kind
    pub indexed_terms: usize,
    /// Distinct delete strings in the deletion index
    pub delete_keys: usize,
    /// SHA-256 of the usable entries, hex encoded
    pub fingerprint: String,
    /// RFC 3339 build timestamp
    pub built_at: String,
}
