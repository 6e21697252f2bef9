//! Duplicate and near-duplicate name detection.
//!
//! Three independent passes over the tree:
//! 1. Name collisions: the same lowercased name at more than one path
//! 2. Similar folders: directory names equal after stripping one suffix
//! 3. Redundant configs: several distinct names sharing a config-like word

use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use treewise_core::Node;

use crate::error::{AnalyzeError, check_node, display_path};

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Configuration for duplicate detection.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct DuplicateConfig {
    /// Conventional file names never reported as duplicates (case-insensitive).
    #[builder(default = "Self::default_conventional_names()")]
    pub conventional_names: Vec<String>,

    /// Suffixes tried in order; the first match is stripped before comparing folders.
    #[builder(default = "Self::default_similarity_suffixes()")]
    pub similarity_suffixes: Vec<String>,

    /// Substrings marking configuration files.
    #[builder(default = "Self::default_config_patterns()")]
    pub config_patterns: Vec<String>,
}

impl DuplicateConfigBuilder {
    fn default_conventional_names() -> Vec<String> {
        to_strings(&["index.ts", "index.tsx", "index.js", "page.tsx", "layout.tsx"])
    }

    fn default_similarity_suffixes() -> Vec<String> {
        to_strings(&["s", "es", "-", "_"])
    }

    fn default_config_patterns() -> Vec<String> {
        to_strings(&["config", "settings", "options"])
    }
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            conventional_names: DuplicateConfigBuilder::default_conventional_names(),
            similarity_suffixes: DuplicateConfigBuilder::default_similarity_suffixes(),
            config_patterns: DuplicateConfigBuilder::default_config_patterns(),
        }
    }
}

impl DuplicateConfig {
    /// Create a new config builder.
    pub fn builder() -> DuplicateConfigBuilder {
        DuplicateConfigBuilder::default()
    }

    /// Check a lowercased name against the conventional allow-list.
    pub fn is_conventional(&self, lowercase_name: &str) -> bool {
        self.conventional_names
            .iter()
            .any(|n| n.eq_ignore_ascii_case(lowercase_name))
    }

    /// Strip the first matching suffix, at most one.
    pub fn strip_suffix<'a>(&self, name: &'a str) -> &'a str {
        self.similarity_suffixes
            .iter()
            .find_map(|suffix| name.strip_suffix(suffix.as_str()))
            .unwrap_or(name)
    }

    /// Two folder names are similar when they differ but strip to the same stem.
    pub fn similar_names(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let (stem_a, stem_b) = (self.strip_suffix(a), self.strip_suffix(b));
        !stem_a.is_empty() && stem_a == stem_b
    }
}

/// Results from duplicate analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Lowercased name to every path using it (first-seen path first).
    pub duplicate_names: IndexMap<String, Vec<String>>,

    /// Pairs of directory names that differ only by a suffix.
    pub similar_folders: Vec<(String, String)>,

    /// Names matching a config pattern that has more than one match.
    pub redundant_configs: Vec<String>,
}

impl DuplicateReport {
    /// Check if anything was found.
    pub fn has_findings(&self) -> bool {
        !self.duplicate_names.is_empty()
            || !self.similar_folders.is_empty()
            || !self.redundant_configs.is_empty()
    }
}

/// Duplicate name finder.
pub struct DuplicateDetector {
    config: DuplicateConfig,
}

impl DuplicateDetector {
    /// Create a new detector with default config.
    pub fn new() -> Self {
        Self {
            config: DuplicateConfig::default(),
        }
    }

    /// Create a new detector with custom config.
    pub fn with_config(config: DuplicateConfig) -> Self {
        Self { config }
    }

    /// Find duplicate and similar names in the tree rooted at `root`.
    pub fn detect(&self, root: &Node) -> Result<DuplicateReport, AnalyzeError> {
        let mut report = DuplicateReport::default();

        let mut first_seen: IndexMap<String, String> = IndexMap::new();
        self.collect_names(root, &mut first_seen, &mut report.duplicate_names)?;

        let mut folders = Vec::new();
        collect_folders(root, &mut folders);
        report.similar_folders = self.similar_folders(&folders);

        for pattern in &self.config.config_patterns {
            let matches: Vec<&String> = first_seen
                .keys()
                .filter(|name| name.contains(pattern.as_str()))
                .collect();
            if matches.len() > 1 {
                report
                    .redundant_configs
                    .extend(matches.into_iter().cloned());
            }
        }

        Ok(report)
    }

    fn collect_names(
        &self,
        node: &Node,
        first_seen: &mut IndexMap<String, String>,
        duplicates: &mut IndexMap<String, Vec<String>>,
    ) -> Result<(), AnalyzeError> {
        check_node(node)?;

        let name = node.name.as_str().to_lowercase();
        if !self.config.is_conventional(&name) {
            let path = display_path(node);
            match first_seen.get(&name) {
                Some(first) => duplicates
                    .entry(name)
                    .or_insert_with(|| vec![first.clone()])
                    .push(path),
                None => {
                    first_seen.insert(name, path);
                }
            }
        }

        for child in &node.children {
            self.collect_names(child, first_seen, duplicates)?;
        }
        Ok(())
    }

    fn similar_folders(&self, folders: &[&str]) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (i, a) in folders.iter().enumerate() {
            for b in &folders[i + 1..] {
                if self.config.similar_names(a, b) {
                    pairs.push((a.to_string(), b.to_string()));
                }
            }
        }
        pairs
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory names in pre-order, repeats included.
fn collect_folders<'a>(node: &'a Node, folders: &mut Vec<&'a str>) {
    if node.is_dir() {
        folders.push(node.name.as_str());
    }
    for child in &node.children {
        collect_folders(child, folders);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_suffix_one_only() {
        let config = DuplicateConfig::default();
        assert_eq!(config.strip_suffix("components"), "component");
        assert_eq!(config.strip_suffix("hooks_"), "hooks");
        assert_eq!(config.strip_suffix("utils-"), "utils");
        assert_eq!(config.strip_suffix("lib"), "lib");
        // "s" wins over "es" because it is tried first
        assert_eq!(config.strip_suffix("classes"), "classe");
    }

    #[test]
    fn test_similar_names_fixed_predicate() {
        let config = DuplicateConfig::default();
        assert!(config.similar_names("component", "components"));
        assert!(config.similar_names("util-", "utils"));
        assert!(!config.similar_names("components", "components"));
        assert!(!config.similar_names("hooks", "lib"));
        assert!(!config.similar_names("s", "-"));
    }

    #[test]
    fn test_conventional_names_case_insensitive() {
        let config = DuplicateConfig::default();
        assert!(config.is_conventional("page.tsx"));
        assert!(config.is_conventional("index.js"));
        assert!(!config.is_conventional("utils.ts"));
    }

    #[test]
    fn test_allow_listed_directory_still_descended() {
        let mut odd = Node::new_directory("index.ts", "index.ts", 1);
        odd.children
            .push(Node::new_file("utils.ts", "index.ts/utils.ts", 2, 1, 0));
        let mut root = Node::new_directory("project", "", 0);
        root.children.push(odd);
        root.children.push(Node::new_file("utils.ts", "utils.ts", 1, 1, 0));

        let report = DuplicateDetector::new().detect(&root).unwrap();
        assert_eq!(
            report.duplicate_names.get("utils.ts"),
            Some(&vec!["index.ts/utils.ts".to_string(), "utils.ts".to_string()])
        );
        assert!(!report.duplicate_names.contains_key("index.ts"));
    }

    #[test]
    fn test_names_collide_case_insensitively() {
        let mut lib = Node::new_directory("lib", "lib", 1);
        lib.children
            .push(Node::new_file("Utils.ts", "lib/Utils.ts", 2, 1, 0));
        let mut root = Node::new_directory("project", "", 0);
        root.children.push(lib);
        root.children.push(Node::new_file("utils.ts", "utils.ts", 1, 1, 0));

        let report = DuplicateDetector::new().detect(&root).unwrap();
        assert_eq!(
            report.duplicate_names.get("utils.ts"),
            Some(&vec!["lib/Utils.ts".to_string(), "utils.ts".to_string()])
        );
    }
}
