//! Shared output formatting for check results.

use anyhow::Result;
use pystyle_core::StyleReport;

use crate::OutputFormat;

/// Print a report in the specified format.
pub fn print(report: &StyleReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => print_json(report)?,
    }
    Ok(())
}

fn print_text(report: &StyleReport) {
    for issue in &report.issues {
        println!("{issue}");
    }
}

fn print_json(report: &StyleReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
