//! Dictionary indexing.
//!
//! [`build`] turns the raw dictionary into a [`Lexicon`] and four derived
//! retrieval structures:
//!
//! - deletion index (bounded edit distance)
//! - Soundex index (first word of each canonical key)
//! - word postings (tokens longer than two characters)
//! - first-character buckets
//!
//! Everything here is built once and read-only afterwards.

mod deletes;
mod lexicon;
mod phonetic;

pub use deletes::*;
pub use lexicon::*;
pub use phonetic::*;

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::config::ResolverConfig;
use crate::resolver::Normalizer;

/// Interned key identifier; ids follow dictionary insertion order.
pub type TermId = u32;

/// Minimum token length (exclusive) for word postings.
const MIN_POSTED_TOKEN_LEN: usize = 2;

/// Index build errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IndexError {
    #[error("Dictionary has no usable entries")]
    EmptyDictionary,
}

pub type IndexResult<T> = Result<T, IndexError>;

/// Read-only retrieval structures derived from a [`Lexicon`].
#[derive(Debug, Default)]
pub struct IndexSet {
    deletes: DeleteIndex,
    phonetic: HashMap<String, Vec<TermId>>,
    words: HashMap<String, Vec<TermId>>,
    first_char: BTreeMap<char, Vec<TermId>>,
}

impl IndexSet {
    pub fn deletes(&self) -> &DeleteIndex {
        &self.deletes
    }

    /// Canonical keys whose first word has this Soundex code.
    pub fn phonetic(&self, code: &str) -> &[TermId] {
        self.phonetic.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Canonical keys containing this token (directly or in their base key).
    pub fn postings(&self, token: &str) -> &[TermId] {
        self.words.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every posted token with its canonical keys.
    pub fn tokens(&self) -> impl Iterator<Item = (&str, &[TermId])> {
        self.words.iter().map(|(t, ids)| (t.as_str(), ids.as_slice()))
    }

    /// Canonical keys starting with this character.
    pub fn first_char(&self, c: char) -> &[TermId] {
        self.first_char.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }

    fn add_canonical(&mut self, id: TermId, canonical: &str, base: Option<&str>) {
        if let Some(first_word) = canonical.split_whitespace().next() {
            self.phonetic.entry(soundex(first_word)).or_default().push(id);
        }

        let tokens = canonical
            .split_whitespace()
            .chain(base.into_iter().flat_map(str::split_whitespace));
        for token in tokens {
            if token.chars().count() > MIN_POSTED_TOKEN_LEN {
                let ids = self.words.entry(token.to_string()).or_default();
                if ids.last() != Some(&id) {
                    ids.push(id);
                }
            }
        }

        if let Some(c) = canonical.chars().next() {
            self.first_char.entry(c).or_default().push(id);
        }
    }
}

/// Build the lexicon and its indexes from raw dictionary names.
///
/// Entries that are blank or normalize to nothing are skipped; if none remain
/// the build fails with [`IndexError::EmptyDictionary`].
pub fn build<I, S>(raw_names: I, config: &ResolverConfig) -> IndexResult<(Lexicon, IndexSet)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalizer = Normalizer::new();
    let mut lexicon = Lexicon::default();
    let mut index = IndexSet {
        deletes: DeleteIndex::new(config.max_dictionary_edit_distance, config.prefix_length),
        ..IndexSet::default()
    };

    for raw in raw_names {
        let name = raw.as_ref().trim();
        let canonical = normalizer.normalize(name);
        if canonical.is_empty() {
            continue;
        }

        let (canonical_id, is_new) = lexicon.intern(&canonical);
        if is_new {
            index.deletes.insert(canonical_id, &canonical);
        }

        let base = normalizer.base_name(name);
        let base = (!base.is_empty() && base != canonical).then_some(base);

        if lexicon.register_canonical(canonical_id, name) {
            index.add_canonical(canonical_id, &canonical, base.as_deref());
        }

        if let Some(base) = &base {
            let (base_id, is_new) = lexicon.intern(base);
            if is_new {
                index.deletes.insert(base_id, base);
            }
            lexicon.register_base(base_id, canonical_id, name);
        }

        let dosage = normalizer.dosage_key(&canonical);
        if !dosage.is_empty() && dosage != canonical && Some(&dosage) != base.as_ref() {
            let (dosage_id, is_new) = lexicon.intern(&dosage);
            if is_new {
                index.deletes.insert(dosage_id, &dosage);
            }
            lexicon.register_dosage(dosage_id, name);
        }
    }

    if lexicon.canonical_count() == 0 {
        return Err(IndexError::EmptyDictionary);
    }

    Ok((lexicon, index))
}
