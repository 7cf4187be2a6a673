//! Resolver configuration.
//!
//! Loaded from TOML; every key is optional and falls back to its default.
//!
//! ```toml
//! scoring = "auto"
//! min_confidence = 0.1
//! composite_min_confidence = 0.6
//! max_alternatives = 3
//! pool_widen_below = 100
//! pool_full_scan_below = 50
//! max_dictionary_edit_distance = 4
//! prefix_length = 7
//! base_discount = 0.9
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which scoring path the resolver runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Deletion-index lookup, confidence from edit distance.
    EditDistance,
    /// Heuristic pool re-ranked by composite similarity.
    Composite,
    /// Edit distance first; dosage-free queries fall back to composite.
    #[default]
    Auto,
}

/// Tunables for index build and resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub scoring: ScoringPolicy,
    /// Acceptance threshold for the edit-distance path
    pub min_confidence: f64,
    /// Acceptance threshold for the composite path
    pub composite_min_confidence: f64,
    /// Alternatives considered after the winner
    pub max_alternatives: usize,
    /// Heuristic pool size below which neighbouring first characters are added
    pub pool_widen_below: usize,
    /// Heuristic pool size below which every canonical key is scored
    pub pool_full_scan_below: usize,
    /// Largest edit distance the deletion index supports
    pub max_dictionary_edit_distance: usize,
    /// Characters of each term used for delete generation
    pub prefix_length: usize,
    /// Multiplier for composite scores computed against a candidate's base key
    pub base_discount: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringPolicy::Auto,
            min_confidence: 0.1,
            composite_min_confidence: 0.6,
            max_alternatives: 3,
            pool_widen_below: 100,
            pool_full_scan_below: 50,
            max_dictionary_edit_distance: 4,
            prefix_length: 7,
            base_discount: 0.9,
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (key, value) in [
            ("min_confidence", self.min_confidence),
            ("composite_min_confidence", self.composite_min_confidence),
            ("base_discount", self.base_discount),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    key, value
                )));
            }
        }

        if self.prefix_length == 0 {
            return Err(ConfigError::Invalid("prefix_length must be positive".into()));
        }
        if self.max_dictionary_edit_distance == 0 {
            return Err(ConfigError::Invalid(
                "max_dictionary_edit_distance must be positive".into(),
            ));
        }
        if self.pool_full_scan_below > self.pool_widen_below {
            return Err(ConfigError::Invalid(format!(
                "pool_full_scan_below ({}) exceeds pool_widen_below ({})",
                self.pool_full_scan_below, self.pool_widen_below
            )));
        }

        Ok(())
    }
}
