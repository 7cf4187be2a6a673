//! Dictionary preprocessing.
//!
//! Expands raw dictionary names before indexing:
//! - Combination products (`5mg/10mg`) become one entry per strength
//! - Each name optionally gains its dosage-free and form-free variants

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::resolver::{Normalizer, DOSAGE_PATTERN};

const DOSE: &str = r"\d+(?:\.\d+)?\s*(?:%|(?:mmol|mcg|mg|ml|meq|µg|μg|gm|g|kg|l|cc|ppm|iu|units?)\b)";

/// A single strength, case-insensitive.
static DOSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){}", DOSE)).expect("dose pattern is a valid regex"));

/// Two strengths joined by a slash, e.g. `500mg/125mg`.
static COMBINATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i){}\s*/\s*{}", DOSE, DOSE)).expect("combination pattern is a valid regex")
});

/// Bare ratios such as `5/10`.
static RATIO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+/\d+\b").expect("ratio pattern is a valid regex"));

/// Options for [`VariantExpander::expand`].
#[derive(Debug, Clone, Copy)]
pub struct ExpandOptions {
    /// Add dosage-free and form-free variants of every name
    pub variations: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self { variations: true }
    }
}

/// Expands dictionary names into the forms users are likely to type.
#[derive(Debug, Clone, Default)]
pub struct VariantExpander {
    normalizer: Normalizer,
}

impl VariantExpander {
    /// Create a new expander with the default form vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the name carries a `dose/dose` combination strength.
    pub fn is_combination(&self, name: &str) -> bool {
        COMBINATION_PATTERN.is_match(name)
    }

    /// Split a combination product into one name per strength.
    ///
    /// Names with a slash but no combination strength lose the slash; other
    /// names pass through unchanged. A combination without a leading name is
    /// kept as is.
    pub fn split_combination(&self, name: &str) -> Vec<String> {
        let name = name.trim();
        if !self.is_combination(name) {
            if name.contains('/') {
                return vec![collapse(&name.replace('/', " "))];
            }
            return vec![name.to_string()];
        }

        let Some(first) = DOSE_PATTERN.find(name) else {
            return vec![name.to_string()];
        };
        let base = name[..first.start()].trim();
        if base.is_empty() {
            return vec![name.to_string()];
        }

        let form = name
            .split_whitespace()
            .last()
            .filter(|word| self.normalizer.is_form_token(word));

        let mut split = Vec::new();
        for dose in DOSE_PATTERN.find_iter(name) {
            let dose = collapse(dose.as_str());
            split.push(format!("{} {}", base, dose));
            if let Some(form) = form {
                split.push(format!("{} {} {}", base, dose, form));
            }
        }
        split
    }

    /// The name itself, then without dosage, without forms, and without both.
    ///
    /// Empty and repeated variants are dropped.
    pub fn variations(&self, name: &str) -> Vec<String> {
        let original = collapse(name);
        let no_dosage = remove_dosage(&original);
        let no_forms = self.remove_forms(&original);
        let no_both = self.remove_forms(&no_dosage);

        let mut variants: Vec<String> = Vec::with_capacity(4);
        for variant in [original, no_dosage, no_forms, no_both] {
            if !variant.is_empty() && !variants.contains(&variant) {
                variants.push(variant);
            }
        }
        variants
    }

    /// Expand a whole dictionary; the result is sorted and unique.
    ///
    /// Combination originals never appear in the output.
    pub fn expand<S: AsRef<str>>(&self, entries: &[S], options: ExpandOptions) -> Vec<String> {
        let mut expanded = BTreeSet::new();
        let mut combinations = BTreeSet::new();

        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            let split = self.split_combination(entry);
            if self.is_combination(entry) && split.iter().all(|s| s != entry) {
                combinations.insert(entry.to_string());
            }

            for name in split {
                if options.variations {
                    expanded.extend(self.variations(&name));
                } else {
                    expanded.insert(name);
                }
            }
        }

        expanded
            .into_iter()
            .filter(|name| !combinations.contains(name))
            .collect()
    }

    fn remove_forms(&self, name: &str) -> String {
        name.split_whitespace()
            .filter(|token| !self.normalizer.is_form_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn remove_dosage(name: &str) -> String {
    let without = DOSAGE_PATTERN.replace_all(name, " ");
    collapse(&RATIO_PATTERN.replace_all(&without, " "))
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_combination() {
        let expander = VariantExpander::new();

        assert_eq!(
            expander.split_combination("Co-Amoxiclav 500mg/125mg Tablet"),
            vec![
                "Co-Amoxiclav 500mg",
                "Co-Amoxiclav 500mg Tablet",
                "Co-Amoxiclav 125mg",
                "Co-Amoxiclav 125mg Tablet",
            ]
        );
        assert_eq!(
            expander.split_combination("Losartan 50 mg / 12.5 mg"),
            vec!["Losartan 50 mg", "Losartan 12.5 mg"]
        );
    }

    #[test]
    fn test_split_slash_without_combination() {
        let expander = VariantExpander::new();

        assert_eq!(expander.split_combination("Paracetamol/Caffeine"), vec!["Paracetamol Caffeine"]);
        assert_eq!(expander.split_combination("Amlodipine 5/10"), vec!["Amlodipine 5 10"]);
        assert_eq!(expander.split_combination("  Aspirin 75mg "), vec!["Aspirin 75mg"]);
    }

    #[test]
    fn test_split_combination_without_name() {
        let expander = VariantExpander::new();
        assert_eq!(expander.split_combination("5mg/10mg"), vec!["5mg/10mg"]);
    }

    #[test]
    fn test_variations() {
        let expander = VariantExpander::new();

        assert_eq!(
            expander.variations("Paracetamol 500mg Tablet"),
            vec![
                "Paracetamol 500mg Tablet",
                "Paracetamol Tablet",
                "Paracetamol 500mg",
                "Paracetamol",
            ]
        );
        assert_eq!(expander.variations("Aspirin"), vec!["Aspirin"]);
        assert_eq!(
            expander.variations("Betadine 10% Solution"),
            vec!["Betadine 10% Solution", "Betadine Solution", "Betadine 10%", "Betadine"]
        );
    }

    #[test]
    fn test_variations_drop_empty() {
        let expander = VariantExpander::new();
        assert_eq!(expander.variations("Tablet 500mg"), vec!["Tablet 500mg", "Tablet", "500mg"]);
    }

    #[test]
    fn test_expand() {
        let expander = VariantExpander::new();
        let entries = [
            "Co-Amoxiclav 500mg/125mg Tablet",
            "Zinc 10mg Tablet",
            "",
            "Zinc 10mg Tablet",
        ];

        let expanded = expander.expand(&entries, ExpandOptions { variations: false });
        assert_eq!(
            expanded,
            vec![
                "Co-Amoxiclav 125mg",
                "Co-Amoxiclav 125mg Tablet",
                "Co-Amoxiclav 500mg",
                "Co-Amoxiclav 500mg Tablet",
                "Zinc 10mg Tablet",
            ]
        );

        let expanded = expander.expand(&entries, ExpandOptions::default());
        assert!(expanded.contains(&"Co-Amoxiclav".to_string()));
        assert!(expanded.contains(&"Zinc".to_string()));
        assert!(expanded.contains(&"Zinc 10mg".to_string()));
        assert!(!expanded.iter().any(|e| e.contains('/')));
        assert!(expanded.windows(2).all(|w| w[0] < w[1]));
    }
}
