//! Report composer for treewise.
//!
//! Turns an analysis [`Report`](treewise_analyze::Report) into the two
//! persisted documents: the full JSON report and the markdown tree.

mod error;
mod json;
mod markdown;

pub use error::ReportError;
pub use json::{read_json, to_json, write_json};
pub use markdown::{MarkdownRenderer, group_thousands};

/// Default file name of the JSON report.
pub const JSON_FILE_NAME: &str = "project_tree_analysis.json";

/// Default file name of the markdown tree.
pub const MARKDOWN_FILE_NAME: &str = "project_tree.md";
