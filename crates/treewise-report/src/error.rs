//! Report output errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing or reading report documents.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be converted to or from JSON.
    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The report file could not be written or read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
