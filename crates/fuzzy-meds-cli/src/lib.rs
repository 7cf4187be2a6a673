//! Command-line front end for fuzzy medication name resolution.

pub mod cli;
pub mod commands;
pub mod logging;
