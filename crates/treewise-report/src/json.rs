//! Structured JSON report document.

use std::path::Path;

use tracing::info;
use treewise_analyze::Report;

use crate::error::ReportError;

/// Serialize the report as pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the JSON report to `path`.
pub fn write_json(report: &Report, path: &Path) -> Result<(), ReportError> {
    std::fs::write(path, to_json(report)?).map_err(|e| ReportError::io(path, e))?;
    info!(path = %path.display(), "JSON report saved");
    Ok(())
}

/// Load a previously saved JSON report.
///
/// The embedded tree is not validated here; call [`Report::validate`].
pub fn read_json(path: &Path) -> Result<Report, ReportError> {
    let text = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}
