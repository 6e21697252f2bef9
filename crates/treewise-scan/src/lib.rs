//! Project tree scanning engine for treewise.
//!
//! This crate walks a project root with jwalk and builds the in-memory
//! [`Node`] tree consumed by the analyzers.
//!
//! # Overview
//!
//! - **Pruning** of hidden entries (except allow-listed dotfiles) and of
//!   ignored directories before they are read
//! - **Line counting** for tracked text extensions, lossy and non-fatal
//! - **Deterministic ordering**: directories first, then files, by name
//! - **Graceful degradation**: unreadable directories become childless and
//!   are reported as warnings
//!
//! # Example
//!
//! ```rust,no_run
//! use treewise_scan::{ScanConfig, TreeScanner};
//!
//! let config = ScanConfig::new("/path/to/project");
//! let tree = TreeScanner::new().scan(&config).unwrap();
//!
//! println!("Nodes: {}", tree.node_count());
//! println!("Warnings: {}", tree.warnings.len());
//! ```

mod lines;
mod scanner;

pub use lines::{count_lines, count_terminators};
pub use scanner::TreeScanner;

// Re-export core types for convenience
pub use treewise_core::{
    Node, NodeKind, ProjectTree, ScanConfig, ScanError, ScanWarning, WarningKind,
};
