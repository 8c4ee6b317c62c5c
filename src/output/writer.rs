//! Report serialization
//!
//! Reports are always written as pretty-printed JSON, either to a file or
//! to stdout.

use crate::output::CrawlReport;
use crate::HarvestError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Renders a report as pretty JSON
pub fn render_report(report: &CrawlReport) -> Result<String, HarvestError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes a report to `path`, or to stdout when `path` is `None`
///
/// # Returns
///
/// * `Ok(())` - The report was written
/// * `Err(HarvestError)` - Serialization or I/O failed
pub fn write_report(report: &CrawlReport, path: Option<&Path>) -> Result<(), HarvestError> {
    let json = render_report(report)?;

    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{}\n", json))?;
            tracing::debug!("Wrote report to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json)?;
            handle.flush()?;
        }
    }

    Ok(())
}
