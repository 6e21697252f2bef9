//! Error types for scanning and tree validation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during scanning.
///
/// Only failures at the scan root are errors; problems below the root are
/// recorded as [`ScanWarning`]s and the scan continues.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// A broken structural invariant between a node and its children.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeViolation {
    /// A file node owns children.
    #[error("file node owns {count} children")]
    FileWithChildren { count: usize },

    /// A child's depth does not follow its parent's.
    #[error("child `{child}` has depth {found}, expected {expected}")]
    DepthMismatch {
        child: String,
        expected: u32,
        found: u32,
    },

    /// A child's relative path is not the join of its parent's path and name.
    #[error("child path `{found}` should be `{expected}`")]
    PathMismatch { expected: String, found: String },
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// A directory could not be listed because permission was denied.
    AccessDenied,
    /// Error reading a directory or entry.
    ReadError,
    /// A tracked file could not be read for line counting.
    DecodeError,
    /// Symbolic link target does not exist.
    BrokenSymlink,
}

/// Non-fatal warning encountered during scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning for a directory that could not be listed.
    pub fn unreadable_dir(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => WarningKind::AccessDenied,
            _ => WarningKind::ReadError,
        };
        Self {
            message: format!("Cannot list {}: {error}", path.display()),
            path,
            kind,
        }
    }

    /// Create a warning for a file whose lines could not be counted.
    pub fn decode_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Cannot read {} for line counting: {error}", path.display()),
            path,
            kind: WarningKind::DecodeError,
        }
    }

    /// Create a broken symlink warning.
    pub fn broken_symlink(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Broken symlink: {}", path.display()),
            path,
            kind: WarningKind::BrokenSymlink,
        }
    }
}
