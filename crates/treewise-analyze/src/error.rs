//! Analysis error types.

use thiserror::Error;

use treewise_core::{Node, TreeViolation};

/// Errors that abort an analysis pass.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The tree breaks a structural invariant; a partial report would mislead.
    #[error("Malformed tree at `{path}`: {violation}")]
    MalformedTree {
        path: String,
        #[source]
        violation: TreeViolation,
    },
}

/// Check a node's edges to its children, naming the node on failure.
pub(crate) fn check_node(node: &Node) -> Result<(), AnalyzeError> {
    node.validate().map_err(|violation| AnalyzeError::MalformedTree {
        path: display_path(node),
        violation,
    })
}

/// Validate every node of a tree, e.g. one reloaded from a saved report.
pub fn validate_tree(root: &Node) -> Result<(), AnalyzeError> {
    check_node(root)?;
    root.children.iter().try_for_each(validate_tree)
}

/// Relative path for reports; the root shows as `.`.
pub(crate) fn display_path(node: &Node) -> String {
    if node.relative_path.is_empty() {
        ".".to_string()
    } else {
        node.relative_path.clone()
    }
}
