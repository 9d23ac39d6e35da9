//! `shaper play`: render a playbook

use std::path::Path;

use shaper_core::{DirectoryManager, LiquidRenderer, run_playbook};

use super::print_report;
use crate::error::Result;

pub fn run_play(manager: &DirectoryManager, playbook: &Path, out: Option<&Path>) -> Result<()> {
    let renderer = LiquidRenderer::new()?;
    let report = run_playbook(manager, &renderer, playbook, out)?;

    let out_dir = out
        .or_else(|| playbook.parent().filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or(Path::new("."));
    print_report(&report, out_dir);
    Ok(())
}
