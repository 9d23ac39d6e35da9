//! Command implementations for shaper-cli

pub mod play;
pub mod read;
pub mod write;

pub use play::run_play;
pub use read::run_read;
pub use write::run_write;

use std::path::Path;

use colored::Colorize;
use shaper_content::{Format, FormatRegistry};
use shaper_core::{FileFailure, MaterializeReport};

use crate::error::{CliError, Result};

/// Check that `path` names a YAML or JSON document.
fn document_format(registry: &FormatRegistry, path: &Path) -> Result<Format> {
    match registry.format_for(path) {
        Ok(format @ (Format::Yaml | Format::Json)) => Ok(format),
        _ => Err(CliError::user(format!(
            "document {} must be a .yml, .yaml or .json file",
            path.display()
        ))),
    }
}

fn print_failures(failures: &[FileFailure]) {
    for failure in failures {
        eprintln!("   {} {}", "!".red(), failure);
    }
}

/// One-line summary of a write batch on stderr, failures listed below it.
fn print_report(report: &MaterializeReport, out_dir: &Path) {
    let status = if report.is_clean() {
        "OK".green().bold()
    } else {
        "WARN".yellow().bold()
    };
    eprintln!(
        "{} wrote {} file(s) to {} ({} failed)",
        status,
        report.written.len(),
        out_dir.display().to_string().cyan(),
        report.failures.len()
    );
    print_failures(&report.failures);
}
