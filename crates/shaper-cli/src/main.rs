//! shaper CLI
//!
//! Converts a directory of configuration files into one document and back.

mod cli;
mod commands;
mod error;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use shaper_core::ShaperConfig;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let manager = config.manager();

    match cli.command {
        Commands::Read { src_dir, out } => commands::run_read(&manager, &src_dir, &out),
        Commands::Write { src_doc, out, key } => {
            commands::run_write(&manager, &src_doc, &out, key.as_deref(), cli.verbose > 0)
        }
        Commands::Play { playbook, out } => commands::run_play(&manager, &playbook, out.as_deref()),
    }
}

/// Log to stderr: warnings by default, `-v` for info, `-vv` for debug.
/// `RUST_LOG` overrides the level.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
    tracing::debug!(verbosity, "logging initialised");
}

fn load_config(explicit: Option<&Path>) -> Result<ShaperConfig> {
    let config = match explicit {
        Some(path) => ShaperConfig::load(path)?,
        None => ShaperConfig::discover(&std::env::current_dir()?)?,
    };
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
