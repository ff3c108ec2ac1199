//! `UserAssist` parser CLI library.
//!
//! This crate provides the CLI interface around `ua-core`: loading registry
//! dumps, writing CSV and JSON output, configuration and logging.

mod cli;
pub mod commands;
mod config;
pub mod dump;
pub mod output;

pub use cli::{Cli, Commands};
pub use config::Config;
