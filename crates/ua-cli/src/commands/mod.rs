//! CLI subcommand implementations.

pub mod parse;
pub mod sessions;
