//! Lexicon: canonical, dosage and base keys mapped back to dictionary names.

use std::collections::HashMap;

use super::TermId;

/// Classification of a matched key against the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass<'a> {
    /// The key is a canonical (or dosage) key of a dictionary name.
    ExactMatch(&'a str),
    /// The key is a base key shared by these names, in dictionary order.
    BaseAlias(&'a [String]),
    /// The key maps to no dictionary name.
    Unclassified,
}

/// Immutable mapping from normalized keys to original display names.
///
/// Every key (canonical, dosage or base) is interned once as a [`TermId`];
/// ids follow first-insertion order.
#[derive(Debug, Default)]
pub struct Lexicon {
    terms: Vec<String>,
    term_ids: HashMap<String, TermId>,
    /// Canonical key → first dictionary name with that key
    exact: HashMap<TermId, String>,
    /// Dosage key → first dictionary name with that key
    dosage: HashMap<TermId, String>,
    /// Base key → dictionary names sharing it, unique, insertion ordered
    bases: HashMap<TermId, Vec<String>>,
    /// Canonical key → its base key
    base_of: HashMap<TermId, TermId>,
    /// Canonical keys in insertion order
    canonical: Vec<TermId>,
}

impl Lexicon {
    /// Text of an interned key.
    pub fn term(&self, id: TermId) -> &str {
        &self.terms[id as usize]
    }

    /// All interned keys, indexed by [`TermId`].
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Id of an interned key.
    pub fn term_id(&self, key: &str) -> Option<TermId> {
        self.term_ids.get(key).copied()
    }

    /// Canonical keys in dictionary order.
    pub fn canonical_keys(&self) -> &[TermId] {
        &self.canonical
    }

    /// Base key of a canonical key, when it differs from it.
    pub fn base_of(&self, canonical: TermId) -> Option<TermId> {
        self.base_of.get(&canonical).copied()
    }

    /// Names sharing a base key.
    pub fn aliases(&self, base: &str) -> &[String] {
        self.term_id(base)
            .and_then(|id| self.bases.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Classify a key: exact (canonical, then dosage key), base alias, or unknown.
    pub fn classify(&self, key: &str) -> KeyClass<'_> {
        let Some(id) = self.term_id(key) else {
            return KeyClass::Unclassified;
        };
        self.classify_id(id)
    }

    /// Classify an interned key.
    pub fn classify_id(&self, id: TermId) -> KeyClass<'_> {
        if let Some(name) = self.exact.get(&id).or_else(|| self.dosage.get(&id)) {
            return KeyClass::ExactMatch(name);
        }
        match self.bases.get(&id) {
            Some(names) if !names.is_empty() => KeyClass::BaseAlias(names),
            _ => KeyClass::Unclassified,
        }
    }

    pub fn canonical_count(&self) -> usize {
        self.exact.len()
    }

    pub fn dosage_count(&self) -> usize {
        self.dosage.len()
    }

    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    /// Intern a key, returning its id and whether it was new.
    pub(crate) fn intern(&mut self, key: &str) -> (TermId, bool) {
        if let Some(&id) = self.term_ids.get(key) {
            return (id, false);
        }
        let id = self.terms.len() as TermId;
        self.terms.push(key.to_string());
        self.term_ids.insert(key.to_string(), id);
        (id, true)
    }

    /// Register a canonical key; returns false when it was already registered.
    pub(crate) fn register_canonical(&mut self, id: TermId, name: &str) -> bool {
        if self.exact.contains_key(&id) {
            return false;
        }
        self.exact.insert(id, name.to_string());
        self.canonical.push(id);
        true
    }

    pub(crate) fn register_dosage(&mut self, id: TermId, name: &str) {
        self.dosage.entry(id).or_insert_with(|| name.to_string());
    }

    pub(crate) fn register_base(&mut self, base: TermId, canonical: TermId, name: &str) {
        let names = self.bases.entry(base).or_default();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        self.base_of.entry(canonical).or_insert(base);
    }
}
