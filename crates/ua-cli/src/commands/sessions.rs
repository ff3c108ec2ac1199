//! Sessions command: print decoded `UEME_CTLSESSION` aggregates.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use ua_core::decode_buckets;

use crate::{Config, dump, output};

/// Runs the sessions command, writing the aggregate tree as JSON.
pub fn run(writer: &mut impl Write, input: &Path, config: &Config) -> Result<()> {
    let buckets = dump::load(input, config.decode_names)?;
    let report = decode_buckets(&buckets);
    output::write_sessions(writer, &report.sessions).context("failed to write sessions")?;
    Ok(())
}
