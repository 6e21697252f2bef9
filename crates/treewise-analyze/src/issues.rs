//! Rule-based structural issue identification.
//!
//! Every [`Check`] is an independent predicate over the scanned tree. All
//! configured checks run on every invocation and the output keeps the check
//! order; nothing is sorted by severity.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use treewise_core::Node;

use crate::error::display_path;

/// How urgent an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// A single structural finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
}

impl Issue {
    fn new(severity: Severity, message: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }
}

const NEXT_CONFIGS: &[&str] = &["next.config.js", "next.config.ts", "next.config.mjs"];
const TEST_DIRS: &[&str] = &["__tests__", "tests", "test"];

/// The fixed battery of structure checks, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Check {
    /// Both `/app` and `/src/app` exist.
    DuplicateAppDirs,
    /// Both `/lib` and `/src/lib` exist.
    DuplicateLibDirs,
    /// No `/public` directory.
    MissingPublicDir,
    /// More than one `next.config.*` at the root.
    MultipleNextConfigs,
    /// More than one conventional test directory at the root.
    ScatteredTests,
    /// `requirements.txt` or a `.py` file at the root.
    PythonFiles,
    /// Both `/types` and `/src/types` exist.
    DuplicateTypeDirs,
    /// Too many directories whose name contains "component".
    ScatteredComponents,
}

impl Check {
    /// Every check in declared order.
    pub fn all() -> Vec<Check> {
        Check::iter().collect()
    }

    /// Severity of the issue this check emits.
    pub fn severity(self) -> Severity {
        match self {
            Check::DuplicateAppDirs | Check::DuplicateLibDirs | Check::MultipleNextConfigs => {
                Severity::Critical
            }
            Check::MissingPublicDir
            | Check::ScatteredTests
            | Check::DuplicateTypeDirs
            | Check::ScatteredComponents => Severity::Warning,
            Check::PythonFiles => Severity::Info,
        }
    }

    /// Evaluate the check, returning at most one issue.
    pub fn evaluate(self, root: &Node, config: &IssueConfig) -> Option<Issue> {
        let exists = |path: &str| root.find(path).is_some();
        let severity = self.severity();

        match self {
            Check::DuplicateAppDirs => (exists("app") && exists("src/app")).then(|| {
                Issue::new(
                    severity,
                    "Duplicate app directories found: /app and /src/app",
                    "Consolidate all app router files under /src/app",
                )
            }),
            Check::DuplicateLibDirs => (exists("lib") && exists("src/lib")).then(|| {
                Issue::new(
                    severity,
                    "Duplicate lib directories found: /lib and /src/lib",
                    "Consolidate all library files under /src/lib",
                )
            }),
            Check::MissingPublicDir => (!exists("public")).then(|| {
                Issue::new(
                    severity,
                    "Missing /public directory for static assets",
                    "Create /public directory for images, fonts, and static files",
                )
            }),
            Check::MultipleNextConfigs => {
                let found: Vec<&str> = NEXT_CONFIGS.iter().copied().filter(|&c| exists(c)).collect();
                (found.len() > 1).then(|| {
                    Issue::new(
                        severity,
                        format!("Multiple Next.js config files found: {}", found.join(", ")),
                        "Keep only next.config.ts and remove others",
                    )
                })
            }
            Check::ScatteredTests => {
                let found = TEST_DIRS.iter().filter(|&&d| exists(d)).count();
                (found > 1).then(|| {
                    Issue::new(
                        severity,
                        "Test files scattered in multiple directories",
                        "Consolidate all tests under /tests directory",
                    )
                })
            }
            Check::PythonFiles => (exists("requirements.txt") || has_extension(root, ".py")).then(|| {
                Issue::new(
                    severity,
                    "Python files found in TypeScript project",
                    "Move Python scripts to /scripts directory or remove if not needed",
                )
            }),
            Check::DuplicateTypeDirs => (exists("types") && exists("src/types")).then(|| {
                Issue::new(
                    severity,
                    "Duplicate type directories found",
                    "Consolidate all TypeScript types under /src/types",
                )
            }),
            Check::ScatteredComponents => {
                let mut dirs = Vec::new();
                component_dirs(root, &mut dirs);
                (dirs.len() > config.component_dir_threshold).then(|| {
                    Issue::new(
                        severity,
                        format!("Components scattered across {} directories", dirs.len()),
                        "Consolidate components under /src/components with proper categorization",
                    )
                })
            }
        }
    }
}

/// Check if any top-level file has the given extension.
fn has_extension(root: &Node, extension: &str) -> bool {
    root.children
        .iter()
        .any(|c| c.is_file() && c.extension() == Some(extension))
}

/// Paths of directories whose name contains "component", any case.
pub fn component_dirs(node: &Node, dirs: &mut Vec<String>) {
    if !node.is_dir() {
        return;
    }
    if node.name.to_lowercase().contains("component") {
        dirs.push(display_path(node));
    }
    for child in &node.children {
        component_dirs(child, dirs);
    }
}

/// Configuration for issue identification.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct IssueConfig {
    /// Checks to run, in output order.
    #[builder(default = "Check::all()")]
    pub checks: Vec<Check>,

    /// Component directory count tolerated before reporting.
    #[builder(default = "2")]
    pub component_dir_threshold: usize,
}

impl Default for IssueConfig {
    fn default() -> Self {
        Self {
            checks: Check::all(),
            component_dir_threshold: 2,
        }
    }
}

impl IssueConfig {
    /// Create a new config builder.
    pub fn builder() -> IssueConfigBuilder {
        IssueConfigBuilder::default()
    }
}

/// Runs the check battery over a tree.
pub struct IssueIdentifier {
    config: IssueConfig,
}

impl IssueIdentifier {
    /// Create a new identifier with default config.
    pub fn new() -> Self {
        Self {
            config: IssueConfig::default(),
        }
    }

    /// Create a new identifier with custom config.
    pub fn with_config(config: IssueConfig) -> Self {
        Self { config }
    }

    /// Evaluate every configured check against the tree rooted at `root`.
    pub fn identify(&self, root: &Node) -> Vec<Issue> {
        self.config
            .checks
            .iter()
            .filter_map(|check| check.evaluate(root, &self.config))
            .collect()
    }
}

impl Default for IssueIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_with(dirs: &[&str], files: &[&str]) -> Node {
        let mut root = Node::new_directory("project", "", 0);
        for dir in dirs {
            root.children.push(Node::new_directory(*dir, *dir, 1));
        }
        for file in files {
            root.children.push(Node::new_file(*file, *file, 1, 1, 0));
        }
        root
    }

    #[test]
    fn test_check_order_and_severity() {
        let all = Check::all();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], Check::DuplicateAppDirs);
        assert_eq!(all[7], Check::ScatteredComponents);
        assert_eq!(Check::PythonFiles.severity(), Severity::Info);
        assert_eq!(Check::MultipleNextConfigs.to_string(), "multiple-next-configs");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Critical.to_string(), "critical");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn test_scattered_tests_needs_two_dirs() {
        let config = IssueConfig::default();
        let one = root_with(&["tests"], &[]);
        assert!(Check::ScatteredTests.evaluate(&one, &config).is_none());

        let two = root_with(&["test", "tests"], &[]);
        assert!(Check::ScatteredTests.evaluate(&two, &config).is_some());

        let jest = root_with(&["__tests__", "tests"], &[]);
        assert!(Check::ScatteredTests.evaluate(&jest, &config).is_some());
    }

    #[test]
    fn test_python_files_only_at_root() {
        let config = IssueConfig::default();
        let mut scripts = Node::new_directory("scripts", "scripts", 1);
        scripts
            .children
            .push(Node::new_file("seed.py", "scripts/seed.py", 2, 1, 0));
        let mut moved = root_with(&[], &[]);
        moved.children.push(scripts);
        assert!(Check::PythonFiles.evaluate(&moved, &config).is_none());

        let loose = root_with(&[], &["seed.py"]);
        assert!(Check::PythonFiles.evaluate(&loose, &config).is_some());
    }

    #[test]
    fn test_requirements_marker() {
        let root = root_with(&[], &["requirements.txt"]);
        let issue = Check::PythonFiles
            .evaluate(&root, &IssueConfig::default())
            .unwrap();
        assert_eq!(issue.severity, Severity::Info);
    }

    #[test]
    fn test_component_dirs_case_insensitive() {
        let mut src = Node::new_directory("src", "src", 1);
        src.children
            .push(Node::new_directory("Components", "src/Components", 2));
        src.children
            .push(Node::new_file("component.ts", "src/component.ts", 2, 1, 0));
        let mut root = root_with(&["ui-components"], &[]);
        root.children.insert(0, src);

        let mut dirs = Vec::new();
        component_dirs(&root, &mut dirs);
        assert_eq!(dirs, vec!["src/Components", "ui-components"]);
    }

    #[test]
    fn test_subset_of_checks() {
        let config = IssueConfig::builder()
            .checks(vec![Check::PythonFiles])
            .build()
            .unwrap();
        let issues = IssueIdentifier::with_config(config).identify(&root_with(&[], &[]));
        assert!(issues.is_empty());
    }
}
