use std::fs::{self, File, OpenOptions};
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use ua_cli::commands::{parse, sessions};
use ua_cli::{Cli, Commands, Config};

/// Opens the log file inside `log_dir`, creating the directory if needed.
fn open_log_file(log_dir: &Path, config: &Config) -> Result<File> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory: {}", log_dir.display()))?;
    let path = log_dir.join(&config.log_file_name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file: {}", path.display()))
}

/// Initialize tracing to stderr, and to `log_file` when one is given.
fn init_tracing(verbose: bool, log_file: Option<File>) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    let log_file = cli
        .log_dir
        .as_deref()
        .map(|dir| open_log_file(dir, &config))
        .transpose()?;
    init_tracing(cli.verbose, log_file);
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Some(Commands::Parse { input, output }) => {
            let args = parse::ParseArgs { input, output };
            parse::run(&mut stdout().lock(), &args, &config)?;
        }
        Some(Commands::Sessions { input }) => {
            sessions::run(&mut stdout().lock(), &input, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
