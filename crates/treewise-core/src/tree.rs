//! Scanned project tree container.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ScanConfig;
use crate::error::ScanWarning;
use crate::node::Node;

/// Complete scanned project tree with scan metadata.
#[derive(Debug, Clone)]
pub struct ProjectTree {
    /// Root node of the tree.
    pub root: Node,

    /// Root path that was scanned.
    pub root_path: PathBuf,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Scan configuration used.
    pub config: ScanConfig,

    /// Warnings encountered during scan.
    pub warnings: Vec<ScanWarning>,
}

impl ProjectTree {
    /// Create a new project tree.
    pub fn new(
        root: Node,
        root_path: PathBuf,
        config: ScanConfig,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root,
            root_path,
            scan_duration,
            config,
            warnings,
        }
    }

    /// Look up a node by path relative to the root.
    pub fn find(&self, relative_path: &str) -> Option<&Node> {
        self.root.find(relative_path)
    }

    /// Check whether a relative path exists in the scanned tree.
    pub fn contains(&self, relative_path: &str) -> bool {
        self.find(relative_path).is_some()
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
