//! Parse command: decode a dump into CSV records and a JSON session tree.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ua_core::{DecodeReport, FormatGeneration, decode_buckets};

use crate::{Config, dump, output};

/// Arguments for the parse command.
#[derive(Debug, Clone)]
pub struct ParseArgs {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Runs the parse command, writing a one-line summary to `writer`.
pub fn run(writer: &mut impl Write, args: &ParseArgs, config: &Config) -> Result<()> {
    let buckets = dump::load(&args.input, config.decode_names)?;
    tracing::info!(buckets = buckets.len(), "parsing UserAssist values");

    let report = decode_buckets(&buckets);
    log_format(&report);

    let out_dir = args
        .output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    write_file(&args.output, |w| output::write_csv(w, &report.records))?;

    let sessions_path = out_dir.join(&config.sessions_file_name);
    write_file(&sessions_path, |w| output::write_sessions(w, &report.sessions))?;

    writeln!(
        writer,
        "Decoded {} records ({} skipped, {} session aggregates) to {}",
        report.records.len(),
        report.skipped.len(),
        report.sessions.len(),
        args.output.display()
    )?;
    Ok(())
}

fn log_format(report: &DecodeReport) {
    match report.format() {
        Some(FormatGeneration::Legacy) => tracing::info!("detected XP-based UserAssist values"),
        Some(FormatGeneration::Modern) => {
            tracing::info!("detected Win7-based UserAssist values, focus values present");
        }
        Some(FormatGeneration::Mixed) => {
            tracing::info!("detected both XP-based and Win7-based UserAssist values");
        }
        None => tracing::warn!("no UserAssist run-count values decoded"),
    }
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("failed to write {}", path.display()))
}
