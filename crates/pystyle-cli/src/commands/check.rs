//! Check command implementation.

use anyhow::{Context, Result};
use pystyle_core::Analyzer;
use std::path::Path;

use crate::OutputFormat;

/// Runs the check command.
///
/// Prints the ordered issue report and exits with code 1 when issues were
/// found; usage and parse errors propagate as errors.
pub fn run(path: &Path, format: OutputFormat) -> Result<()> {
    let analyzer = Analyzer::new(path);

    tracing::info!("Checking {:?}", path);

    let report = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&report, format)?;

    if !report.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}
