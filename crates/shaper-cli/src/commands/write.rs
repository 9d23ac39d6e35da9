//! `shaper write`: document to directory

use std::path::Path;

use shaper_core::{DirectoryManager, as_tree, backward, filter_keys};

use super::{document_format, print_report};
use crate::error::Result;

/// Materialize the document at `src_doc` under `out_dir`.
///
/// With `key`, only paths containing it are written. `list_files` prints the
/// paths about to be written on stdout first.
pub fn run_write(
    manager: &DirectoryManager,
    src_doc: &Path,
    out_dir: &Path,
    key: Option<&str>,
    list_files: bool,
) -> Result<()> {
    document_format(manager.registry(), src_doc)?;

    let document = manager.registry().read(src_doc)?;
    let mut flat = backward(as_tree(&document)?);
    if let Some(key) = key {
        flat = filter_keys(flat, key);
    }

    if list_files {
        println!("==> Files to render :");
        for path in flat.keys() {
            println!("{path}");
        }
    }

    let report = manager.materialize(&flat, out_dir)?;
    print_report(&report, out_dir);
    Ok(())
}
