//! Domain models for the fuzzy-meds system.

mod resolution;
mod stats;

pub use resolution::*;
pub use stats::*;
