//! `shaper read`: directory to document

use std::path::Path;

use colored::Colorize;
use serde_json::Value;
use shaper_core::{Collection, DirectoryManager, forward};

use super::{document_format, print_failures};
use crate::error::Result;

/// Collect `src_dir` and write it as one nested document to `out`.
pub fn run_read(manager: &DirectoryManager, src_dir: &Path, out: &Path) -> Result<()> {
    document_format(manager.registry(), out)?;

    let Collection {
        entries,
        failures,
        skipped,
    } = manager.collect(src_dir)?;
    let files = entries.len();

    let tree = forward(entries);
    manager.registry().write(&Value::Object(tree), out)?;

    let status = if failures.is_empty() {
        "OK".green().bold()
    } else {
        "WARN".yellow().bold()
    };
    eprintln!(
        "{} collected {} file(s) into {} ({} failed, {} skipped)",
        status,
        files,
        out.display().to_string().cyan(),
        failures.len(),
        skipped.len()
    );
    print_failures(&failures);
    Ok(())
}
