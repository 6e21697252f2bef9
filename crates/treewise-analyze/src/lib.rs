//! Analysis algorithms for treewise.
//!
//! This crate turns a scanned [`ProjectTree`] into a [`Report`]:
//!
//! - **Statistics** - totals, per-extension counts, largest files, nesting depth
//! - **Duplicate names** - name collisions, similar folder names, redundant configs
//! - **Issues** - a fixed battery of structure checks ([`Check`])
//! - **Recommendations** - a static, priority-ordered list
//!
//! ```rust,ignore
//! use treewise_analyze::Analyzer;
//! use treewise_scan::{ScanConfig, TreeScanner};
//!
//! let tree = TreeScanner::new().scan(&ScanConfig::new("/path/to/project")).unwrap();
//! let report = Analyzer::new().analyze(&tree).unwrap();
//!
//! for issue in &report.issues {
//!     println!("[{}] {}", issue.severity, issue.message);
//! }
//! ```
//!
//! Statistics and duplicate detection validate the tree as they walk it and
//! fail with [`AnalyzeError::MalformedTree`] instead of under-counting.

mod duplicates;
mod error;
mod issues;
mod recommendations;
mod report;
mod stats;

pub use duplicates::{DuplicateConfig, DuplicateConfigBuilder, DuplicateDetector, DuplicateReport};
pub use error::{AnalyzeError, validate_tree};
pub use issues::{Check, Issue, IssueConfig, IssueConfigBuilder, IssueIdentifier, Severity, component_dirs};
pub use recommendations::{Priority, Recommendation, generate_recommendations};
pub use report::{AnalyzeConfig, AnalyzeConfigBuilder, Analyzer, Report};
pub use stats::{
    LargeFile, NO_EXTENSION, Statistics, StatsAggregator, StatsConfig, StatsConfigBuilder, megabytes,
};

// Re-export core types
pub use treewise_core::{Node, ProjectTree};
