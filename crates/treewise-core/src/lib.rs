//! Core types and traits for treewise.
//!
//! This crate provides the fundamental data structures used throughout
//! the treewise workspace: the scanned node tree, scan configuration,
//! and the error and warning types shared by scanner and analyzers.

mod config;
mod error;
mod node;
mod tree;

pub use config::{
    DEFAULT_ALLOWED_DOTFILES, DEFAULT_IGNORE_DIRS, DEFAULT_TRACKED_EXTENSIONS, ScanConfig,
    ScanConfigBuilder,
};
pub use error::{ScanError, ScanWarning, TreeViolation, WarningKind};
pub use node::{Node, NodeKind, PATH_SEPARATOR, extension_of, join_relative};
pub use tree::ProjectTree;
