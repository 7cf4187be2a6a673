//! Medication name normalizer.
//!
//! Handles:
//! - Canonical keys (unicode folding, lowercase, punctuation → space)
//! - Dosage detection (500mg, 0.5%, 10 iu, BL 40, ...)
//! - Base keys (dosage and dosage-form tokens stripped)
//! - Dosage keys (form tokens stripped, dosage kept)

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A numeric value followed by a unit (optionally per volume, `250mg/5ml`),
/// or a standalone "BL n" strength marker.
///
/// `%` has no word boundary after it, so it is matched before the `\b` group.
pub(crate) static DOSAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:\.\d+)?\s*(?:%|(?:mcg|mg|µg|μg|gm|g|kg|ml|l|cc|meq|mmol|ppm|iu|units?)\b)(?:\s*/\s*(?:\d+(?:\.\d+)?\s*)?(?:ml|l)\b)?|\bbl\s*\d+(?:\.\d+)?\b",
    )
    .expect("dosage pattern is a valid regex")
});

/// Closed vocabulary of dosage-form words, including plurals and abbreviations.
pub const FORM_WORDS: &[&str] = &[
    "tablet", "tablets", "tab", "tabs",
    "capsule", "capsules", "cap", "caps",
    "injection", "injections", "inj",
    "syrup", "syrups",
    "cream", "creams",
    "ointment", "ointments",
    "drop", "drops",
    "solution", "solutions", "sol",
    "suspension", "suspensions", "susp",
    "powder", "powders",
    "gel", "gels",
    "lotion", "lotions",
    "spray", "sprays",
    "patch", "patches",
    "vial", "vials",
];

/// Normalizer for medication names and queries.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Dosage-form vocabulary (lowercase)
    forms: HashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a new normalizer with the default form vocabulary.
    pub fn new() -> Self {
        Self {
            forms: FORM_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Canonical lookup key: folded, lowercased, punctuation replaced, whitespace collapsed.
    pub fn normalize(&self, text: &str) -> String {
        clean(&fold(text))
    }

    /// Whether the text carries a dosage (numeric value + unit).
    pub fn has_dosage(&self, text: &str) -> bool {
        DOSAGE_PATTERN.is_match(&fold(text))
    }

    /// Base key: canonical key with every dosage and form token removed.
    ///
    /// May be empty; callers fall back to [`Normalizer::normalize`].
    pub fn base_name(&self, text: &str) -> String {
        // Percent dosages only survive before punctuation is dropped.
        let folded = fold(text);
        let without_dosage = DOSAGE_PATTERN.replace_all(&folded, " ");
        let mut current = clean(&without_dosage);

        loop {
            let stripped = DOSAGE_PATTERN.replace_all(&current, " ");
            let next = self.strip_forms(&stripped);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Dosage key: canonical key with form tokens removed and dosage kept.
    pub fn dosage_key(&self, canonical: &str) -> String {
        self.strip_forms(canonical)
    }

    /// Whether a token belongs to the dosage-form vocabulary.
    pub fn is_form_token(&self, token: &str) -> bool {
        let trimmed = token.trim_matches(|c| c == '.' || c == '+' || c == '-');
        self.forms.contains(&trimmed.to_lowercase())
    }

    /// Add a custom dosage-form word.
    pub fn add_form(&mut self, form: &str) {
        self.forms.insert(form.to_lowercase());
    }

    fn strip_forms(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.is_form_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Compatibility decomposition + lowercase, re-decomposed so the output is stable.
fn fold(text: &str) -> String {
    text.nfkd().flat_map(char::to_lowercase).nfkd().collect()
}

fn clean(text: &str) -> String {
    let replaced: String = text
        .chars()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '+' | '-') {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
