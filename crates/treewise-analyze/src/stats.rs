//! Aggregate statistics over a scanned tree.

use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use treewise_core::{Node, NodeKind};

use crate::error::{AnalyzeError, check_node};

/// Extension key for files without an extension.
pub const NO_EXTENSION: &str = "no_extension";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Convert bytes to megabytes rounded to two decimals.
pub fn megabytes(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}

/// Configuration for statistics aggregation.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct StatsConfig {
    /// Number of entries kept in the largest-files ranking.
    #[builder(default = "20")]
    pub largest_files_limit: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            largest_files_limit: 20,
        }
    }
}

impl StatsConfig {
    /// Create a new config builder.
    pub fn builder() -> StatsConfigBuilder {
        StatsConfigBuilder::default()
    }
}

/// One entry of the largest-files ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeFile {
    /// Path relative to the scan root.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Size in megabytes, two decimals.
    pub size_mb: f64,
}

/// Totals for a scanned tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_files: u64,
    pub total_directories: u64,
    /// Total file size in bytes.
    pub total_size: u64,
    pub total_size_mb: f64,
    pub total_lines: u64,
    /// File count per extension, in first-seen order.
    pub files_by_extension: IndexMap<String, u64>,
    /// Largest files, size descending.
    pub largest_files: Vec<LargeFile>,
    /// Maximum depth among directories.
    pub deepest_nesting: u32,
}

impl Statistics {
    /// Files plus directories, root included.
    pub fn node_count(&self) -> u64 {
        self.total_files + self.total_directories
    }

    /// The `n` most common extensions, count descending.
    pub fn top_extensions(&self, n: usize) -> Vec<(&str, u64)> {
        let mut counts: Vec<(&str, u64)> = self
            .files_by_extension
            .iter()
            .map(|(ext, count)| (ext.as_str(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(n);
        counts
    }
}

/// Computes [`Statistics`] in a single depth-first pass.
pub struct StatsAggregator {
    config: StatsConfig,
}

impl StatsAggregator {
    /// Create a new aggregator with default config.
    pub fn new() -> Self {
        Self {
            config: StatsConfig::default(),
        }
    }

    /// Create a new aggregator with custom config.
    pub fn with_config(config: StatsConfig) -> Self {
        Self { config }
    }

    /// Aggregate statistics for the tree rooted at `root`.
    pub fn aggregate(&self, root: &Node) -> Result<Statistics, AnalyzeError> {
        let mut stats = Statistics::default();
        let mut candidates = Vec::new();

        self.visit(root, &mut stats, &mut candidates)?;

        // Stable: equal sizes keep traversal order.
        candidates.sort_by(|a: &LargeFile, b| b.size.cmp(&a.size));
        candidates.truncate(self.config.largest_files_limit);
        stats.largest_files = candidates;
        stats.total_size_mb = megabytes(stats.total_size);

        Ok(stats)
    }

    fn visit(
        &self,
        node: &Node,
        stats: &mut Statistics,
        candidates: &mut Vec<LargeFile>,
    ) -> Result<(), AnalyzeError> {
        check_node(node)?;

        match &node.kind {
            NodeKind::File {
                size,
                extension,
                line_count,
            } => {
                stats.total_files += 1;
                stats.total_size += size;
                stats.total_lines += line_count;

                let key = if extension.is_empty() {
                    NO_EXTENSION
                } else {
                    extension.as_str()
                };
                *stats.files_by_extension.entry(key.to_string()).or_insert(0) += 1;

                if *size > 0 {
                    candidates.push(LargeFile {
                        path: node.relative_path.clone(),
                        size: *size,
                        size_mb: megabytes(*size),
                    });
                }
            }
            NodeKind::Directory => {
                stats.total_directories += 1;
                stats.deepest_nesting = stats.deepest_nesting.max(node.depth);
                for child in &node.children {
                    self.visit(child, stats, candidates)?;
                }
            }
        }

        Ok(())
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        let mut lib = Node::new_directory("lib", "src/lib", 2);
        lib.children
            .push(Node::new_file("db.ts", "src/lib/db.ts", 3, 3_000_000, 120));
        let mut src = Node::new_directory("src", "src", 1);
        src.children.push(lib);
        src.children.push(Node::new_file("main.ts", "src/main.ts", 2, 500, 10));

        let mut root = Node::new_directory("project", "", 0);
        root.children.push(src);
        root.children.push(Node::new_file("LICENSE", "LICENSE", 1, 1000, 0));
        root.children.push(Node::new_file("empty.ts", "empty.ts", 1, 0, 0));
        root
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(megabytes(0), 0.0);
        assert_eq!(megabytes(1_048_576), 1.0);
        assert_eq!(megabytes(3_000_000), 2.86);
    }

    #[test]
    fn test_totals() {
        let stats = StatsAggregator::new().aggregate(&tree()).unwrap();

        assert_eq!(stats.total_files, 4);
        assert_eq!(stats.total_directories, 3);
        assert_eq!(stats.total_size, 3_001_500);
        assert_eq!(stats.total_size_mb, 2.86);
        assert_eq!(stats.total_lines, 130);
        assert_eq!(stats.deepest_nesting, 2);
        assert_eq!(stats.files_by_extension.get(".ts"), Some(&3));
        assert_eq!(stats.files_by_extension.get(NO_EXTENSION), Some(&1));
    }

    #[test]
    fn test_largest_files_skip_empty() {
        let stats = StatsAggregator::new().aggregate(&tree()).unwrap();

        let paths: Vec<&str> = stats.largest_files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["src/lib/db.ts", "LICENSE", "src/main.ts"]);
        assert_eq!(stats.largest_files[0].size_mb, 2.86);
    }

    #[test]
    fn test_largest_files_limit() {
        let config = StatsConfig::builder()
            .largest_files_limit(2usize)
            .build()
            .unwrap();
        let stats = StatsAggregator::with_config(config)
            .aggregate(&tree())
            .unwrap();
        assert_eq!(stats.largest_files.len(), 2);
    }

    #[test]
    fn test_top_extensions() {
        let stats = StatsAggregator::new().aggregate(&tree()).unwrap();
        assert_eq!(stats.top_extensions(1), vec![(".ts", 3)]);
        assert_eq!(stats.top_extensions(10).len(), 2);
    }

    #[test]
    fn test_malformed_tree_aborts() {
        let mut root = tree();
        root.children[1].children.push(Node::new_file("x", "LICENSE/x", 2, 1, 0));

        let err = StatsAggregator::new().aggregate(&root).unwrap_err();
        assert!(err.to_string().contains("LICENSE"));
    }
}
