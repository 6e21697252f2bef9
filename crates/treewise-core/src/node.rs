//! File and directory node types.

use std::path::Path;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::TreeViolation;

/// Separator used in relative paths on every platform.
pub const PATH_SEPARATOR: char = '/';

/// Type of file system node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file.
    File {
        /// Size in bytes as reported by the filesystem.
        size: u64,
        /// Lowercase suffix including the leading dot, empty if none.
        extension: CompactString,
        /// Number of line terminators (tracked extensions only, 0 otherwise).
        line_count: u64,
    },
    /// Directory.
    Directory,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File { .. })
    }
}

/// A single file or directory in the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Base name of the entry.
    pub name: CompactString,

    /// Node type and file metadata.
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Path relative to the scan root, `/`-separated. Empty for the root.
    #[serde(rename = "path")]
    pub relative_path: String,

    /// Nesting level, root = 0.
    pub depth: u32,

    /// Children (directories only): subdirectories first, then files, each by name.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new file node.
    pub fn new_file(
        name: impl Into<CompactString>,
        relative_path: impl Into<String>,
        depth: u32,
        size: u64,
        line_count: u64,
    ) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            kind: NodeKind::File {
                size,
                extension,
                line_count,
            },
            relative_path: relative_path.into(),
            depth,
            children: Vec::new(),
        }
    }

    /// Create a new directory node with no children.
    pub fn new_directory(
        name: impl Into<CompactString>,
        relative_path: impl Into<String>,
        depth: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            relative_path: relative_path.into(),
            depth,
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// File size in bytes, 0 for directories.
    pub fn size(&self) -> u64 {
        match &self.kind {
            NodeKind::File { size, .. } => *size,
            NodeKind::Directory => 0,
        }
    }

    /// File extension (possibly empty), `None` for directories.
    pub fn extension(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { extension, .. } => Some(extension.as_str()),
            NodeKind::Directory => None,
        }
    }

    /// Line count, 0 for directories and untracked files.
    pub fn line_count(&self) -> u64 {
        match &self.kind {
            NodeKind::File { line_count, .. } => *line_count,
            NodeKind::Directory => 0,
        }
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Count this node and every node below it.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Look up a descendant by `/`-separated path relative to this node.
    ///
    /// An empty path resolves to the node itself.
    pub fn find(&self, relative_path: &str) -> Option<&Node> {
        relative_path
            .split(PATH_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| {
                node.children.iter().find(|child| child.name == segment)
            })
    }

    /// Build the relative path of a child named `name` under this node.
    pub fn child_path(&self, name: &str) -> String {
        join_relative(&self.relative_path, name)
    }

    /// Sort children: directories before files, then by name.
    pub fn sort_children(&mut self) {
        self.children.sort_by(|a, b| {
            b.is_dir()
                .cmp(&a.is_dir())
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    /// Check the structural invariants between this node and its direct children.
    pub fn validate(&self) -> Result<(), TreeViolation> {
        if self.is_file() && !self.children.is_empty() {
            return Err(TreeViolation::FileWithChildren {
                count: self.children.len(),
            });
        }

        for child in &self.children {
            if child.depth != self.depth + 1 {
                return Err(TreeViolation::DepthMismatch {
                    child: child.name.to_string(),
                    expected: self.depth + 1,
                    found: child.depth,
                });
            }

            let expected = self.child_path(&child.name);
            if child.relative_path != expected {
                return Err(TreeViolation::PathMismatch {
                    expected,
                    found: child.relative_path.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Join a parent's relative path and a child name.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{PATH_SEPARATOR}{name}")
    }
}

/// Lowercased extension of a file name, including the leading dot.
///
/// Dotfiles without a further dot (e.g. `.env`) have no extension.
pub fn extension_of(name: &str) -> CompactString {
    match Path::new(name).extension() {
        Some(ext) if !ext.is_empty() => {
            CompactString::from(format!(".{}", ext.to_string_lossy().to_lowercase()))
        }
        _ => CompactString::default(),
    }
}
